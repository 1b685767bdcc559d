// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::geometry::Point;

/// The pointing device that produced an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PointerDevice {
    /// A mouse (or anything with precise hover).
    #[default]
    Mouse,
    /// A touch screen.
    Touch,
}

/// What a pointer event describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    /// A button was pressed.
    Down,
    /// A button was released.
    Up,
    /// A press and release close together in space and time.
    Click,
    /// A drag crossed the drag threshold.
    BeginDrag,
    /// The pointer moved while dragging.
    Drag,
    /// The scroll wheel moved.
    Scroll,
    /// The pointer moved.
    Move,
}

/// Keyboard modifier state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub control: bool,
    /// Alt (Option on macOS).
    pub alt: bool,
    /// The platform command key (Command on macOS, Super elsewhere).
    pub command: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        command: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        command: false,
    };
}

/// One pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Button index; 0 is the primary button.
    pub button: u8,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
    /// Motion delta for drag and scroll events.
    pub delta: Point,
    /// Device that produced the event.
    pub device: PointerDevice,
    /// Consecutive click count for down/click events.
    pub count: u32,
}

impl PointerEvent {
    /// Whether this event belongs to the primary button.
    pub fn primary_button(&self) -> bool {
        self.button == 0
    }
}

/// Whether a key went down or up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    /// The key was pressed.
    #[default]
    Pressed,
    /// The key was released.
    Released,
}

/// A logical key, independent of the windowing backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Home.
    Home,
    /// End.
    End,
    /// A character key, identified by its lowercase character.
    Character(char),
}

impl Key {
    /// Whether this is one of the four arrow keys.
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft | Self::ArrowRight | Self::ArrowUp | Self::ArrowDown
        )
    }
}

/// One keyboard event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeyEvent {
    /// Pressed or released.
    pub state: KeyState,
    /// The logical key.
    pub key: Key,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
    /// The printable character the event produces, if any. Enter carries
    /// `'\n'`; pure navigation keys carry nothing.
    pub ch: Option<char>,
}

impl KeyEvent {
    /// A plain key press without modifiers or a printable character.
    pub fn pressed(key: Key) -> Self {
        Self {
            state: KeyState::Pressed,
            key,
            modifiers: Modifiers::NONE,
            ch: None,
        }
    }

    /// A key press that types `ch`.
    pub fn typed(ch: char) -> Self {
        Self {
            state: KeyState::Pressed,
            key: Key::Character(ch.to_ascii_lowercase()),
            modifiers: Modifiers::NONE,
            ch: Some(ch),
        }
    }

    /// The same event with `modifiers` applied.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A platform text-input event, surfaced by an on-screen or IME keyboard
/// across frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextEvent {
    /// Dismiss without committing; the control deactivates.
    Cancel,
    /// Commit `text` and deactivate the control.
    Submit {
        /// The full replacement content.
        text: String,
    },
    /// Replace the whole content while editing continues.
    Set {
        /// The full replacement content.
        text: String,
        /// Selection to install, if the platform reports one.
        selection: Option<Range<usize>>,
    },
}
