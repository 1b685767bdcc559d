// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edit operations over a `(state, buffer)` pair.
//!
//! Every operation keeps the caret/selection invariants and reports through
//! its `bool` return whether the content changed. Degenerate inputs (empty
//! text, no selection, empty clipboard) are defined as no-ops, never errors.

use crate::arena::TextArena;
use crate::buffer::TextBuffer;
use crate::editing::CaretState;

/// Inserts `text` at the caret and advances the caret by the number of
/// characters actually inserted (which a maximum length may truncate).
pub fn insert(
    state: &mut CaretState,
    buffer: &mut TextBuffer<'_>,
    arena: &mut TextArena,
    text: &str,
) -> bool {
    if text.is_empty() {
        return false;
    }

    let added = buffer.insert(arena, state.caret, text);
    state.caret += added;
    added > 0
}

/// Inserts a single character at the caret.
pub fn insert_char(
    state: &mut CaretState,
    buffer: &mut TextBuffer<'_>,
    arena: &mut TextArena,
    ch: char,
) -> bool {
    insert(state, buffer, arena, ch.encode_utf8(&mut [0_u8; 4]))
}

/// Replaces the whole buffer content, collapsing the selection and placing
/// the caret after the inserted text.
pub fn set(
    state: &mut CaretState,
    buffer: &mut TextBuffer<'_>,
    arena: &mut TextArena,
    text: &str,
) {
    buffer.clear(arena, text.chars().count());
    state.caret = buffer.insert(arena, 0, text);
    state.selection = 0;
}

/// Removes the selected range, collapsing the caret to the selection's left
/// edge. No-op without a selection.
pub fn delete_selection(
    state: &mut CaretState,
    buffer: &mut TextBuffer<'_>,
    arena: &mut TextArena,
) -> bool {
    if state.selection == 0 {
        return false;
    }

    if state.selection < 0 {
        state.caret = (state.caret as isize + state.selection).max(0) as usize;
    }

    buffer.remove(arena, state.caret, state.selection.unsigned_abs());
    state.selection = 0;
    true
}

/// Deletes the selection, or the character before the caret. No-op at the
/// buffer start.
pub fn delete_backward(
    state: &mut CaretState,
    buffer: &mut TextBuffer<'_>,
    arena: &mut TextArena,
) -> bool {
    if delete_selection(state, buffer, arena) {
        return true;
    }

    if state.caret > 0 {
        state.caret -= 1;
        buffer.remove(arena, state.caret, 1);
        return true;
    }

    false
}

/// Deletes the selection, or the character after the caret. No-op at the
/// buffer end.
pub fn delete_forward(
    state: &mut CaretState,
    buffer: &mut TextBuffer<'_>,
    arena: &mut TextArena,
) -> bool {
    if delete_selection(state, buffer, arena) {
        return true;
    }

    if state.caret < buffer.len() {
        buffer.remove(arena, state.caret, 1);
        return true;
    }

    false
}

/// Replaces the selection with `clipboard`. No-op on an empty clipboard.
pub fn paste(
    state: &mut CaretState,
    buffer: &mut TextBuffer<'_>,
    arena: &mut TextArena,
    clipboard: &str,
) -> bool {
    if clipboard.is_empty() {
        return false;
    }

    delete_selection(state, buffer, arena);
    insert(state, buffer, arena, clipboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::TextArena;
    use crate::buffer::TextBuffer;

    fn setup() -> (CaretState, TextArena) {
        (CaretState::default(), TextArena::new())
    }

    #[test]
    fn set_round_trips() {
        let (mut state, mut arena) = setup();
        let mut buffer = TextBuffer::from_str(&mut arena, "", 0);
        set(&mut state, &mut buffer, &mut arena, "abc");
        assert_eq!(buffer.to_string(&arena), "abc");
        assert_eq!(state.caret, 3);
        assert_eq!(state.selection, 0);
    }

    #[test]
    fn delete_selection_without_selection_is_noop() {
        let (mut state, mut arena) = setup();
        let mut buffer = TextBuffer::from_str(&mut arena, "abc", 0);
        state.caret = 1;
        assert!(!delete_selection(&mut state, &mut buffer, &mut arena));
        assert_eq!(buffer.to_string(&arena), "abc");
    }

    #[test]
    fn delete_selection_collapses_to_left_edge() {
        let (mut state, mut arena) = setup();
        let mut buffer = TextBuffer::from_str(&mut arena, "hello world", 0);
        state.caret = 8;
        state.selection = -3; // "o w"
        assert!(delete_selection(&mut state, &mut buffer, &mut arena));
        assert_eq!(buffer.to_string(&arena), "hellorld");
        assert_eq!(state.caret, 5);
        assert_eq!(state.selection, 0);
    }

    #[test]
    fn backward_and_forward_deletes() {
        let (mut state, mut arena) = setup();
        let mut buffer = TextBuffer::from_str(&mut arena, "abc", 0);

        state.caret = 0;
        assert!(!delete_backward(&mut state, &mut buffer, &mut arena));

        state.caret = 3;
        assert!(!delete_forward(&mut state, &mut buffer, &mut arena));

        state.caret = 1;
        assert!(delete_forward(&mut state, &mut buffer, &mut arena));
        assert_eq!(buffer.to_string(&arena), "ac");

        state.caret = 2;
        assert!(delete_backward(&mut state, &mut buffer, &mut arena));
        assert_eq!(buffer.to_string(&arena), "a");
        assert_eq!(state.caret, 1);
    }

    #[test]
    fn insert_advances_caret_by_inserted_count() {
        let (mut state, mut arena) = setup();
        let mut buffer = TextBuffer::from_str(&mut arena, "abcd", 6);
        state.caret = 4;
        assert!(insert(&mut state, &mut buffer, &mut arena, "efgh"));
        assert_eq!(buffer.to_string(&arena), "abcdef");
        assert_eq!(state.caret, 6);
    }

    #[test]
    fn empty_insert_and_empty_paste_are_noops() {
        let (mut state, mut arena) = setup();
        let mut buffer = TextBuffer::from_str(&mut arena, "abc", 0);
        assert!(!insert(&mut state, &mut buffer, &mut arena, ""));
        assert!(!paste(&mut state, &mut buffer, &mut arena, ""));
        assert_eq!(buffer.to_string(&arena), "abc");
    }

    #[test]
    fn paste_replaces_selection() {
        let (mut state, mut arena) = setup();
        let mut buffer = TextBuffer::from_str(&mut arena, "hello world", 0);
        state.caret = 5;
        state.selection = 6; // " world"
        assert!(paste(&mut state, &mut buffer, &mut arena, "!"));
        assert_eq!(buffer.to_string(&arena), "hello!");
        assert_eq!(state.caret, 6);
    }
}
