// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard-command derivation.
//!
//! One table per platform family. macOS diverges from everyone else — word
//! jumps ride Option+Arrow and line jumps Command+Arrow, while the other
//! platforms use Ctrl+Arrow for word jumps and have no line-jump chord.
//! Users feel this difference, so the tables are kept separate rather than
//! generalized.

use crate::input::events::{Key, KeyEvent};

/// Editing commands derived from one keyboard event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyCommand {
    /// Extend the selection while moving.
    pub select: bool,
    /// Move by word instead of by character.
    pub jump_word: bool,
    /// Move to the line boundary.
    pub jump_end: bool,
    /// Select the whole buffer.
    pub select_all: bool,
    /// Copy the selection to the clipboard.
    pub copy: bool,
    /// Copy the selection and delete it.
    pub cut: bool,
    /// Insert the clipboard content.
    pub paste: bool,
}

impl KeyCommand {
    /// Whether no command was recognized.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Platform family the keyboard chords follow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Windows, Linux, and everything else.
    Generic,
    /// The macOS family.
    MacOs,
}

impl Platform {
    /// Platform family of the current build target.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Generic
        }
    }
}

/// Derives the command set for `event` under `platform`'s chord conventions.
pub fn command_for_event(platform: Platform, event: &KeyEvent) -> KeyCommand {
    match platform {
        Platform::MacOs => macos_command(event),
        Platform::Generic => generic_command(event),
    }
}

fn macos_command(event: &KeyEvent) -> KeyCommand {
    let mut cmd = KeyCommand::default();

    let arrow = event.key.is_arrow();
    let option = event.modifiers.alt;
    let command = event.modifiers.command;

    if arrow && command && !option {
        cmd.jump_end = true;
    } else if arrow && !command && option {
        cmd.jump_word = true;
    }

    if arrow && event.modifiers.shift {
        cmd.select = true;
    }

    if command {
        match event.key {
            Key::Character('a') => cmd.select_all = true,
            Key::Character('c') => cmd.copy = true,
            Key::Character('v') => cmd.paste = true,
            Key::Character('x') => cmd.cut = true,
            _ => {}
        }
    }

    cmd
}

fn generic_command(event: &KeyEvent) -> KeyCommand {
    let mut cmd = KeyCommand::default();

    let arrow = event.key.is_arrow();
    let control = event.modifiers.control;

    if arrow && event.modifiers.shift {
        cmd.select = true;
    }

    if arrow && control {
        cmd.jump_word = true;
    }

    if control {
        match event.key {
            Key::Character('a') => cmd.select_all = true,
            Key::Character('c') => cmd.copy = true,
            Key::Character('v') => cmd.paste = true,
            Key::Character('x') => cmd.cut = true,
            _ => {}
        }
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::{command_for_event, KeyCommand, Platform};
    use crate::input::events::{Key, KeyEvent, Modifiers};

    fn event(key: Key, modifiers: Modifiers) -> KeyEvent {
        KeyEvent::pressed(key).with_modifiers(modifiers)
    }

    #[test]
    fn generic_word_jump_uses_control() {
        let cmd = command_for_event(
            Platform::Generic,
            &event(
                Key::ArrowRight,
                Modifiers {
                    control: true,
                    ..Modifiers::NONE
                },
            ),
        );
        assert!(cmd.jump_word);
        assert!(!cmd.jump_end);
        assert!(!cmd.select);
    }

    #[test]
    fn generic_has_no_line_jump_chord() {
        for modifiers in [
            Modifiers {
                command: true,
                ..Modifiers::NONE
            },
            Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
        ] {
            let cmd = command_for_event(Platform::Generic, &event(Key::ArrowRight, modifiers));
            assert!(!cmd.jump_end);
            assert!(!cmd.jump_word);
        }
    }

    #[test]
    fn macos_word_jump_uses_option() {
        let cmd = command_for_event(
            Platform::MacOs,
            &event(
                Key::ArrowLeft,
                Modifiers {
                    alt: true,
                    ..Modifiers::NONE
                },
            ),
        );
        assert!(cmd.jump_word);
        assert!(!cmd.jump_end);
    }

    #[test]
    fn macos_line_jump_uses_command() {
        let cmd = command_for_event(
            Platform::MacOs,
            &event(
                Key::ArrowLeft,
                Modifiers {
                    command: true,
                    ..Modifiers::NONE
                },
            ),
        );
        assert!(cmd.jump_end);
        assert!(!cmd.jump_word);
    }

    #[test]
    fn macos_command_plus_option_is_neither_jump() {
        let cmd = command_for_event(
            Platform::MacOs,
            &event(
                Key::ArrowLeft,
                Modifiers {
                    command: true,
                    alt: true,
                    ..Modifiers::NONE
                },
            ),
        );
        assert!(!cmd.jump_end);
        assert!(!cmd.jump_word);
    }

    #[test]
    fn shift_arrow_selects_on_both_platforms() {
        for platform in [Platform::Generic, Platform::MacOs] {
            let cmd = command_for_event(platform, &event(Key::ArrowUp, Modifiers::SHIFT));
            assert!(cmd.select);
        }
    }

    #[test]
    fn clipboard_chords() {
        let control = Modifiers {
            control: true,
            ..Modifiers::NONE
        };
        let command = Modifiers {
            command: true,
            ..Modifiers::NONE
        };

        for (platform, modifiers) in [(Platform::Generic, control), (Platform::MacOs, command)] {
            assert!(command_for_event(platform, &event(Key::Character('a'), modifiers)).select_all);
            assert!(command_for_event(platform, &event(Key::Character('c'), modifiers)).copy);
            assert!(command_for_event(platform, &event(Key::Character('v'), modifiers)).paste);
            assert!(command_for_event(platform, &event(Key::Character('x'), modifiers)).cut);
        }

        // the chord key is not interchangeable across platforms
        assert!(
            command_for_event(Platform::Generic, &event(Key::Character('c'), command)).is_empty()
        );
        assert!(command_for_event(Platform::MacOs, &event(Key::Character('c'), control)).is_empty());
    }
}
