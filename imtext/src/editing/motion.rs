// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret and selection movement over a laid-out buffer.
//!
//! Pure functions from `(state, text, layout)` to new caret/selection
//! positions, plus the view↔model coordinate mapping they are built on.
//! `text` must be the exact content the layout was built from; a stale
//! layout is a caller bug and fails fast on indexing.

use crate::editing::CaretState;
use crate::geometry::{Point, Rect};
use crate::input::KeyCommand;
use crate::layout::{TextLayout, TextShaper};

/// Half-period of the caret blink, in seconds.
pub const CARET_BLINK_INTERVAL: f64 = 0.25;

/// How long after an interaction the caret stays solid.
pub const CARET_BLINK_COOLDOWN: f64 = CARET_BLINK_INTERVAL;

/// Whether the caret is in the visible phase of its blink.
pub fn caret_visible(time: f64, blink_time: f64) -> bool {
    let phase = (time - blink_time - CARET_BLINK_COOLDOWN).max(0.0);
    (phase / CARET_BLINK_INTERVAL) as i64 % 2 == 0
}

/// Finds the line containing `caret`, and the caret's offset within it.
///
/// Walks the line list accumulating counts; the last line absorbs any
/// remainder. O(lines).
pub fn line_at_caret(caret: usize, layout: &TextLayout) -> (usize, usize) {
    let mut caret = caret;
    let mut line = 0;
    while layout.line_count().saturating_sub(1) > line && layout.lines[line].count <= caret {
        caret -= layout.lines[line].count;
        line += 1;
    }
    (line, caret)
}

/// Maps a view-space point to a caret offset.
///
/// The line is picked by its proportional vertical bucket (points above the
/// rectangle resolve to the first line, below to the last), then the line's
/// characters are walked accumulating advances, tie-breaking each character
/// at its horizontal midpoint. The proportional bucketing drifts when the
/// point sits horizontally outside the laid-out span; that limitation is
/// inherited and intentional.
pub fn view_to_caret(
    point: Point,
    rect: Rect,
    layout: &TextLayout,
    text: &[char],
    shaper: &dyn TextShaper,
) -> usize {
    if layout.lines.is_empty() {
        return 0;
    }

    let last = layout.line_count() - 1;
    let line = if point.y < rect.y {
        0
    } else if point.y > rect.y + rect.height {
        last
    } else if layout.height <= 0.0 {
        0
    } else {
        let ratio = (point.y - rect.y) / layout.height;
        ((ratio * layout.line_count() as f32) as usize).min(last)
    };

    let span = layout.lines[line];
    let mut caret = span.start;
    let mut px = rect.x + span.offset_x;
    if point.x < px {
        return caret;
    }

    if text.is_empty() {
        return 0;
    }

    let start = span.start;
    let mut end = span.end();
    if end > start && text[end - 1] == '\n' {
        end -= 1;
    }

    for i in start..end {
        let advance = shaper.char_advance(text[i], layout.font_size);
        if px > point.x || px + advance < point.x {
            px += advance;
            caret += 1;
            continue;
        }
        if point.x - px > advance / 2.0 {
            caret += 1;
        }
        break;
    }

    caret
}

/// View-space position of the caret: the top of its line, at the summed
/// advance of the characters before it.
pub fn caret_to_view(
    caret: usize,
    rect: Rect,
    layout: &TextLayout,
    text: &[char],
    shaper: &dyn TextShaper,
) -> Point {
    let (line, offset) = line_at_caret(caret, layout);
    line_offset_to_view(line, offset, rect, layout, text, shaper)
}

/// View-space position of `offset` within `line`.
pub fn line_offset_to_view(
    line: usize,
    offset: usize,
    rect: Rect,
    layout: &TextLayout,
    text: &[char],
    shaper: &dyn TextShaper,
) -> Point {
    let y = line as f32 * layout.line_height + layout.offset_y;
    let mut x = if line >= layout.line_count() {
        layout.offset_x
    } else {
        layout.lines[line].offset_x
    };

    if line < layout.line_count() && offset <= layout.lines[line].count {
        let start = layout.lines[line].start;
        for ch in &text[start..start + offset] {
            x += shaper.char_advance(*ch, layout.font_size);
        }
    }

    Point::new(rect.x + x, rect.y + y)
}

/// Caret offset after a word jump from `caret` in `dir` (-1 left, +1 right).
///
/// Runs of letters, digits, and symbols count as words; a run of two or more
/// whitespace characters acts as a word gap too. Moving left lands on the
/// boundary itself, moving right lands one past it.
pub fn end_of_word_or_spaces(caret: usize, dir: i32, text: &[char]) -> usize {
    let len = text.len() as isize;
    let mut caret = (caret as isize + dir as isize).clamp(0, len);

    let mut visited_word = false;
    let mut spaces = 0;

    while caret > 0 && caret < len {
        let ch = text[caret as usize];

        let whitespace = ch.is_whitespace();
        if whitespace {
            spaces += 1;
        }

        if is_word_char(ch) {
            visited_word = true;
        } else if visited_word {
            if dir < 0 {
                caret += 1;
            }
            break;
        } else if !whitespace && spaces > 1 {
            if dir < 0 {
                caret += 1;
            }
            break;
        }

        caret += dir as isize;
    }

    caret as usize
}

// Letters and digits bind into words, as do math-style symbols; punctuation
// and whitespace break them.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
        || matches!(
            ch,
            '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' | '¢'..='¥' | '€' | '±' | '×' | '÷'
        )
}

/// Caret offset after a line jump from `caret` in `dir`.
///
/// Left lands on the line's start. Right lands on the line's last offset,
/// stepping back over a terminating newline (and over the wrap boundary of a
/// soft-broken line) so end-of-line sits before the break, not after it.
pub fn end_of_line(caret: usize, dir: i32, text: &[char], layout: &TextLayout) -> usize {
    if layout.lines.is_empty() {
        return caret;
    }

    let (line, _) = line_at_caret(caret, layout);
    let span = layout.lines[line];

    if dir > 0 {
        let mut index = span.end();
        if index > 0 && (index != text.len() || text[index - 1] == '\n') {
            index -= 1;
        }
        return index;
    }

    if dir < 0 {
        return span.start;
    }

    caret
}

/// Moves the caret one step horizontally (-1 left, +1 right).
///
/// Precedence: an active selection without the select modifier collapses to
/// its near edge in `dir` and moves no further; otherwise a line jump, then
/// a word jump, then a single-character move. The selection is extended by
/// the caret delta when the select modifier is held, else reset. Returns
/// whether the caret or selection changed.
pub fn move_caret_horizontal(
    state: &mut CaretState,
    text: &[char],
    layout: &TextLayout,
    dir: i32,
    cmd: KeyCommand,
) -> bool {
    let prev_caret = state.caret;
    let prev_selection = state.selection;
    let caret = state.caret as isize;

    if state.selection != 0 && !cmd.select {
        let edge = if dir < 0 {
            caret.min(caret + state.selection)
        } else {
            caret.max(caret + state.selection)
        };
        state.caret = edge.max(0) as usize;
    } else if cmd.jump_end {
        state.caret = end_of_line(state.caret, dir, text, layout);
    } else if cmd.jump_word {
        state.caret = end_of_word_or_spaces(state.caret, dir, text);
    } else {
        state.caret = (caret + dir as isize).max(0) as usize;
    }

    state.clamp_caret(text.len());

    if cmd.select {
        state.selection += prev_caret as isize - state.caret as isize;
    } else {
        state.selection = 0;
    }

    state.caret != prev_caret || state.selection != prev_selection
}

/// Moves the caret one line vertically (-1 up, +1 down) by re-resolving its
/// view position through [`view_to_caret`].
///
/// Disabled while a word or line jump modifier is held. Selection handling
/// mirrors the horizontal case.
pub fn move_caret_vertical(
    state: &mut CaretState,
    text: &[char],
    rect: Rect,
    layout: &TextLayout,
    shaper: &dyn TextShaper,
    dir: i32,
    cmd: KeyCommand,
) -> bool {
    if cmd.jump_word || cmd.jump_end {
        return false;
    }

    let prev_caret = state.caret;
    let prev_selection = state.selection;

    let mut position = caret_to_view(state.caret, rect, layout, text, shaper);
    position.y += layout.line_height * 0.5 + dir as f32 * layout.line_height;
    state.caret = view_to_caret(position, rect, layout, text, shaper);

    if cmd.select {
        state.selection += prev_caret as isize - state.caret as isize;
    } else {
        state.selection = 0;
    }

    state.caret != prev_caret || state.selection != prev_selection
}

/// Expands the selection to the word under the caret, clamped to the caret's
/// line. Used for double-click.
pub fn select_word_at_caret(state: &mut CaretState, layout: &TextLayout, text: &[char]) {
    if layout.lines.is_empty() {
        return;
    }

    let (line, _) = line_at_caret(state.caret, layout);
    let max_left = layout.lines[line].start;
    let mut max_right = layout.lines[line].end();
    if line < layout.line_count() - 1 {
        // keep the trailing newline (or wrap boundary) out of the selection
        max_right -= 1;
    }

    let right = end_of_word_or_spaces(state.caret, 1, text).min(max_right);
    let left = end_of_word_or_spaces(state.caret, -1, text).max(max_left);

    state.caret = right;
    state.selection = left as isize - right as isize;
}

/// Expands the selection to the caret's whole line. Used for triple-click.
pub fn select_line_at_caret(state: &mut CaretState, layout: &TextLayout) {
    if layout.lines.is_empty() {
        return;
    }

    let (line, _) = line_at_caret(state.caret, layout);
    let left = layout.lines[line].start;
    let right = layout.lines[line].end();

    state.caret = right;
    state.selection = left as isize - right as isize;
}

/// The selected text, clamped into the buffer.
pub fn selected_text<'t>(state: &CaretState, text: &'t [char]) -> &'t [char] {
    if state.selection == 0 {
        return &[];
    }
    let range = state.selected_range();
    &text[range.start.min(text.len())..range.end.min(text.len())]
}

/// Selection highlight rectangles, one per line the selection touches.
pub fn selection_rects(
    state: &CaretState,
    rect: Rect,
    layout: &TextLayout,
    text: &[char],
    shaper: &dyn TextShaper,
) -> Vec<Rect> {
    let mut rects = Vec::new();
    if state.selection == 0 || layout.lines.is_empty() {
        return rects;
    }

    let range = state.selected_range();
    let (begin_line, _) = line_at_caret(range.start, layout);
    let (end_line, _) = line_at_caret(range.end, layout);

    for i in begin_line..=end_line {
        let line = layout.lines[i];
        let relative_begin = range.start.saturating_sub(line.start);
        let relative_end = (range.end - line.start).min(line.count);

        let p0 = line_offset_to_view(i, relative_begin, rect, layout, text, shaper);
        let p1 = line_offset_to_view(i, relative_end, rect, layout, text, shaper);

        rects.push(Rect::new(p0.x, p0.y, p1.x - p0.x, layout.line_height));
    }

    rects
}

/// The caret bar's rectangle.
pub fn caret_rect(
    state: &CaretState,
    rect: Rect,
    layout: &TextLayout,
    text: &[char],
    shaper: &dyn TextShaper,
    caret_width: f32,
) -> Rect {
    let position = caret_to_view(state.caret, rect, layout, text, shaper);
    Rect::new(position.x, position.y, caret_width, layout.line_height)
}

/// Scroll delta that brings the caret back inside `view`.
///
/// Returns zero when the caret is already visible. Horizontal tracking still
/// misses when the caret sits outside the laid-out span.
pub fn scroll_to_caret(
    state: &CaretState,
    view: Rect,
    text_rect: Rect,
    layout: &TextLayout,
    text: &[char],
    shaper: &dyn TextShaper,
) -> Point {
    let position = caret_to_view(state.caret, text_rect, layout, text, shaper);
    let mut offset = Point::ZERO;

    let caret_top = position.y;
    let caret_bottom = position.y + layout.line_height;
    if view.y > caret_top {
        offset.y += view.y - caret_top;
    } else if view.bottom() < caret_bottom {
        offset.y += view.bottom() - caret_bottom;
    }

    let advance = if state.caret >= text.len() {
        0.0
    } else {
        shaper.char_advance(text[state.caret], layout.font_size)
    };
    let caret_left = position.x;
    let caret_right = position.x + advance;
    if view.x > caret_left {
        offset.x += view.x - caret_left;
    } else if view.right() < caret_right {
        offset.x += view.right() - caret_right;
    }

    offset
}
