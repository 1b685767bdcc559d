// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame text-edit dispatcher.
//!
//! [`EditDriver`] borrows the frame's collaborators — shaper, input source,
//! activation registry, arena, render sink — and runs one control's editing
//! pass: pointer events move the caret and drive drag selection, keyboard
//! events go through the platform command table into the motion and edit
//! operations, and platform text events implement the touch-keyboard
//! Set/Submit/Cancel protocol. Everything completes synchronously within the
//! frame; at most one buffer mutation pass happens per control per frame.

use tracing::debug;

use crate::arena::TextArena;
use crate::buffer::TextBuffer;
use crate::editing::{motion, ops, CaretState};
use crate::geometry::{Point, Rect};
use crate::input::{
    command_for_event, InputSource, Key, KeyEvent, KeyState, Platform, PointerDevice, PointerEvent,
    PointerEventKind, TextEvent, TouchKeyboardSettings, TouchKeyboardType,
};
use crate::layout::{LayoutOptions, TextLayout, TextOverflow, TextShaper};
use crate::store::ControlId;

/// Tracks which control owns input focus and which is under the pointer.
///
/// Hover resolution itself happens in the host (it knows about overlap and
/// clipping); controls report their rectangles through
/// [`register`](Self::register) every frame.
pub trait ControlRegistry {
    /// Whether `id` currently owns input focus.
    fn is_active(&self, id: ControlId) -> bool;

    /// Whether `id` is under the pointer.
    fn is_hovered(&self, id: ControlId) -> bool;

    /// Gives `id` exclusive input focus.
    fn set_active(&mut self, id: ControlId);

    /// Clears input focus.
    fn clear_active(&mut self);

    /// Whether controls are globally read-only this frame.
    fn is_read_only(&self) -> bool {
        false
    }

    /// Reports a control's rectangle for next frame's hover resolution.
    fn register(&mut self, id: ControlId, rect: Rect);
}

/// Draw-command consumer. Fire and forget; the sink owns batching and
/// styling.
pub trait RenderSink {
    /// A filled rectangle: selection highlight or caret bar.
    fn fill_rect(&mut self, rect: Rect);

    /// A run of glyphs at `origin`, laid out by `layout`.
    fn glyphs(&mut self, text: &[char], origin: Point, layout: &TextLayout);
}

/// Per-control options for one [`EditDriver::text_edit`] pass.
#[derive(Clone, Debug)]
pub struct EditOptions {
    /// Whether the control accepts newlines.
    pub multiline: bool,
    /// Whether to soft-wrap at the control width.
    pub wrap: bool,
    /// Font size for layout.
    pub font_size: f32,
    /// Horizontal alignment in `0.0..=1.0`.
    pub align_x: f32,
    /// Vertical alignment in `0.0..=1.0`.
    pub align_y: f32,
    /// Width of the caret bar.
    pub caret_width: f32,
    /// Touch keyboard layout to request.
    pub keyboard: TouchKeyboardType,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            multiline: false,
            wrap: false,
            font_size: 16.0,
            align_x: 0.0,
            align_y: 0.0,
            caret_width: 1.0,
            keyboard: TouchKeyboardType::Default,
        }
    }
}

impl EditOptions {
    /// Options for a wrapping multiline control.
    pub fn multiline() -> Self {
        Self {
            multiline: true,
            wrap: true,
            ..Self::default()
        }
    }
}

/// What one editing pass changed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EditResponse {
    /// Whether the buffer content changed.
    pub text_changed: bool,
    /// Whether the control owns focus after the pass.
    pub active: bool,
    /// Scroll delta that keeps the caret visible; zero when none is needed.
    pub scroll: Point,
}

/// A short-lived driver over one frame's collaborators.
pub struct EditDriver<'a> {
    /// The layout oracle.
    pub shaper: &'a dyn TextShaper,
    /// The frame's input.
    pub input: &'a mut dyn InputSource,
    /// Focus and hover tracking.
    pub registry: &'a mut dyn ControlRegistry,
    /// The frame arena backing transient buffers.
    pub arena: &'a mut TextArena,
    /// The draw-command consumer.
    pub sink: &'a mut dyn RenderSink,
    /// Keyboard chord conventions; [`Platform::current`] unless testing
    /// another family.
    pub platform: Platform,
}

impl EditDriver<'_> {
    /// Runs one editing pass for the control `id` over `buffer` and `state`,
    /// inside `rect`.
    ///
    /// Returns whether the content changed, along with the control's focus
    /// state and any scroll adjustment needed to keep the caret visible.
    pub fn text_edit(
        &mut self,
        id: ControlId,
        buffer: &mut TextBuffer<'_>,
        state: &mut CaretState,
        rect: Rect,
        options: &EditOptions,
    ) -> EditResponse {
        let active = self.registry.is_active(id);
        let hovered = self.registry.is_hovered(id);
        let editable = !self.registry.is_read_only();

        let mut text_changed = false;
        let mut scroll = Point::ZERO;

        let layout = self.shaper.build_layout(
            buffer.text(self.arena),
            &LayoutOptions {
                max_width: rect.width,
                max_height: rect.height,
                align_x: options.align_x,
                align_y: options.align_y,
                font_size: options.font_size,
                wrap: options.wrap,
                overflow: TextOverflow::Overflow,
            },
        );

        if active {
            for highlight in
                motion::selection_rects(state, rect, &layout, buffer.text(self.arena), self.shaper)
            {
                self.sink.fill_rect(highlight);
            }
        }

        self.sink
            .glyphs(buffer.text(self.arena), rect.origin(), &layout);

        state.clamp_caret(buffer.len());

        if let Some(event) = self.input.pointer_event().copied() {
            self.handle_pointer_event(&event, id, buffer, state, rect, &layout, active, hovered);
            if event.kind == PointerEventKind::Drag && active {
                scroll = motion::scroll_to_caret(
                    state,
                    rect,
                    rect,
                    &layout,
                    buffer.text(self.arena),
                    self.shaper,
                );
            }
        }

        if active {
            if motion::caret_visible(self.input.time(), state.blink_time) {
                self.sink.fill_rect(motion::caret_rect(
                    state,
                    rect,
                    &layout,
                    buffer.text(self.arena),
                    self.shaper,
                    options.caret_width,
                ));
            }

            for index in 0..self.input.keyboard_event_count() {
                let Some(event) = self.input.keyboard_event(index).copied() else {
                    continue;
                };
                let (handled, changed) =
                    self.handle_key_event(&event, buffer, state, rect, &layout, options, editable);
                if handled {
                    text_changed |= changed;
                    state.blink_time = self.input.time();
                    self.input.consume_keyboard_event(index);
                    scroll = motion::scroll_to_caret(
                        state,
                        rect,
                        rect,
                        &layout,
                        buffer.text(self.arena),
                        self.shaper,
                    );
                }
            }

            match self.input.text_event().cloned() {
                Some(TextEvent::Cancel) => {
                    debug!(?id, "text edit cancelled");
                    self.registry.clear_active();
                }
                Some(TextEvent::Set { text, selection }) => {
                    text_changed = !buffer.is_empty() || !text.is_empty();
                    ops::set(state, buffer, self.arena, &text);
                    if let Some(selection) = selection {
                        state.caret = selection.start;
                        state.selection = selection.len() as isize;
                    }
                    self.input.consume_text_event();
                }
                Some(TextEvent::Submit { text }) => {
                    debug!(?id, "text edit submitted");
                    self.registry.clear_active();
                    text_changed = !buffer.is_empty() || !text.is_empty();
                    ops::set(state, buffer, self.arena, &text);
                    self.input.consume_text_event();
                }
                None => {
                    if editable {
                        let settings = TouchKeyboardSettings {
                            multiline: options.multiline,
                            kind: options.keyboard,
                            max_len: buffer.max_len(),
                            selection: state.selected_range(),
                        };
                        self.input
                            .request_touch_keyboard(id, buffer.text(self.arena), &settings);
                    }
                }
            }
        }

        self.registry.register(id, rect);

        EditResponse {
            text_changed,
            active: self.registry.is_active(id),
            scroll,
        }
    }

    /// Edits a `String` in place, copying it back only when the pass changed
    /// it. `max_len` of zero means unlimited.
    pub fn text_edit_str(
        &mut self,
        id: ControlId,
        text: &mut String,
        state: &mut CaretState,
        rect: Rect,
        max_len: usize,
        options: &EditOptions,
    ) -> bool {
        let mut buffer = TextBuffer::from_str(self.arena, text, max_len);
        let response = self.text_edit(id, &mut buffer, state, rect, options);
        if response.text_changed {
            *text = buffer.to_string(self.arena);
        }
        response.text_changed
    }

    #[allow(clippy::too_many_arguments, reason = "frame context is wide")]
    fn handle_pointer_event(
        &mut self,
        event: &PointerEvent,
        id: ControlId,
        buffer: &TextBuffer<'_>,
        state: &mut CaretState,
        rect: Rect,
        layout: &TextLayout,
        active: bool,
        hovered: bool,
    ) {
        let position = self.input.pointer_position();

        match event.kind {
            // double/triple press selects word/line
            PointerEventKind::Down
                if event.primary_button() && active && hovered && event.count > 1 =>
            {
                state.selection = 0;
                state.caret = motion::view_to_caret(
                    position,
                    rect,
                    layout,
                    buffer.text(self.arena),
                    self.shaper,
                );
                state.blink_time = self.input.time();

                if event.count == 2 {
                    motion::select_word_at_caret(state, layout, buffer.text(self.arena));
                } else {
                    motion::select_line_at_caret(state, layout);
                }
            }

            kind @ (PointerEventKind::Click
            | PointerEventKind::Down
            | PointerEventKind::BeginDrag)
                if begins_editing(kind, event, active, hovered) =>
            {
                if !active {
                    debug!(?id, "text edit activated");
                    self.registry.set_active(id);
                }

                state.selection = 0;
                state.caret = motion::view_to_caret(
                    position,
                    rect,
                    layout,
                    buffer.text(self.arena),
                    self.shaper,
                );
                state.blink_time = self.input.time();

                self.input.consume_pointer_event();
            }

            PointerEventKind::Drag if active => {
                let caret = motion::view_to_caret(
                    position,
                    rect,
                    layout,
                    buffer.text(self.arena),
                    self.shaper,
                );
                state.selection -= caret as isize - state.caret as isize;
                state.caret = caret;
                state.blink_time = self.input.time();

                self.input.consume_pointer_event();
            }

            PointerEventKind::Down if active && !hovered => {
                debug!(?id, "text edit deactivated by outside press");
                self.registry.clear_active();
            }

            _ => {}
        }
    }

    #[allow(clippy::too_many_arguments, reason = "frame context is wide")]
    fn handle_key_event(
        &mut self,
        event: &KeyEvent,
        buffer: &mut TextBuffer<'_>,
        state: &mut CaretState,
        rect: Rect,
        layout: &TextLayout,
        options: &EditOptions,
        editable: bool,
    ) -> (bool, bool) {
        if event.state != KeyState::Pressed {
            return (false, false);
        }

        let mut state_changed = false;
        let mut text_changed = false;

        let cmd = command_for_event(self.platform, event);

        match event.key {
            Key::ArrowLeft => {
                state_changed |= motion::move_caret_horizontal(
                    state,
                    buffer.text(self.arena),
                    layout,
                    -1,
                    cmd,
                );
            }
            Key::ArrowRight => {
                state_changed |=
                    motion::move_caret_horizontal(state, buffer.text(self.arena), layout, 1, cmd);
            }
            Key::ArrowUp => {
                state_changed |= motion::move_caret_vertical(
                    state,
                    buffer.text(self.arena),
                    rect,
                    layout,
                    self.shaper,
                    -1,
                    cmd,
                );
            }
            Key::ArrowDown => {
                state_changed |= motion::move_caret_vertical(
                    state,
                    buffer.text(self.arena),
                    rect,
                    layout,
                    self.shaper,
                    1,
                    cmd,
                );
            }
            Key::Delete if editable => {
                text_changed |= ops::delete_forward(state, buffer, self.arena);
            }
            Key::Backspace if editable => {
                text_changed |= ops::delete_backward(state, buffer, self.arena);
            }
            _ => {
                if cmd.select_all {
                    state.select_all(buffer.len());
                    state_changed = true;
                } else if cmd.cut {
                    let selected: String =
                        motion::selected_text(state, buffer.text(self.arena)).iter().collect();
                    self.input.set_clipboard(&selected);
                    if editable {
                        text_changed |= ops::delete_selection(state, buffer, self.arena);
                    }
                    state_changed = true;
                } else if cmd.copy {
                    let selected: String =
                        motion::selected_text(state, buffer.text(self.arena)).iter().collect();
                    self.input.set_clipboard(&selected);
                    state_changed = true;
                } else if cmd.paste {
                    if editable {
                        let clipboard = self.input.clipboard().to_owned();
                        text_changed |= ops::paste(state, buffer, self.arena, &clipboard);
                    }
                } else if let Some(ch) = event.ch {
                    // no new lines in single-line mode
                    if ch != '\0' && (options.multiline || ch != '\n') && editable {
                        text_changed |= ops::delete_selection(state, buffer, self.arena);
                        text_changed |= ops::insert_char(state, buffer, self.arena, ch);
                    }
                }
            }
        }

        (state_changed || text_changed, text_changed)
    }
}

fn begins_editing(
    kind: PointerEventKind,
    event: &PointerEvent,
    active: bool,
    hovered: bool,
) -> bool {
    match kind {
        // touch activates on tap, so hover exists before the press lands
        PointerEventKind::Click => event.device == PointerDevice::Touch && hovered && !active,
        PointerEventKind::Down | PointerEventKind::BeginDrag => {
            event.primary_button()
                && hovered
                && (event.device == PointerDevice::Mouse || active)
        }
        _ => false,
    }
}

/// Selects the whole buffer and resets the blink phase, as the Select-All
/// chord would.
pub fn select_all(state: &mut CaretState, len: usize, time: f64) {
    state.select_all(len);
    state.blink_time = time;
}
