// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic collaborators for driving the editor in tests.
//!
//! A fixed-advance shaper, a plain-field registry, and a recording sink
//! replace the host-provided collaborators, so editing scenarios run without
//! fonts, windows, or a GPU.

use crate::driver::{ControlRegistry, RenderSink};
use crate::geometry::{Point, Rect};
use crate::layout::{LayoutOptions, Line, TextLayout, TextShaper};
use crate::store::ControlId;

/// A monospace layout oracle: every character is one cell wide, lines break
/// greedily at the available width and at hard newlines.
#[derive(Copy, Clone, Debug)]
pub struct MonoShaper {
    /// Advance width of every character.
    pub advance: f32,
    /// Line height.
    pub line_height: f32,
}

impl Default for MonoShaper {
    fn default() -> Self {
        Self {
            advance: 8.0,
            line_height: 16.0,
        }
    }
}

impl TextShaper for MonoShaper {
    fn build_layout(&self, text: &[char], options: &LayoutOptions) -> TextLayout {
        let per_line = if options.wrap && options.max_width.is_finite() {
            ((options.max_width / self.advance) as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = Vec::new();
        let mut start = 0;
        let mut count = 0;
        for (i, ch) in text.iter().enumerate() {
            count += 1;
            if *ch == '\n' || count == per_line {
                lines.push(Line {
                    start,
                    count,
                    offset_x: 0.0,
                });
                start = i + 1;
                count = 0;
            }
        }
        lines.push(Line {
            start,
            count,
            offset_x: 0.0,
        });

        let mut width: f32 = 0.0;
        for line in &mut lines {
            let mut visible = line.count;
            if visible > 0 && text[line.start + visible - 1] == '\n' {
                visible -= 1;
            }
            let line_width = visible as f32 * self.advance;
            if options.max_width.is_finite() {
                line.offset_x = (options.max_width - line_width).max(0.0) * options.align_x;
            }
            width = width.max(line_width);
        }

        let height = lines.len() as f32 * self.line_height;
        let offset_y = if options.max_height.is_finite() {
            (options.max_height - height).max(0.0) * options.align_y
        } else {
            0.0
        };

        TextLayout {
            lines,
            line_height: self.line_height,
            font_size: options.font_size,
            offset_x: 0.0,
            offset_y,
            width,
            height,
        }
    }

    fn char_advance(&self, _ch: char, _font_size: f32) -> f32 {
        self.advance
    }

    fn line_height(&self, _font_size: f32) -> f32 {
        self.line_height
    }
}

/// A registry with plain fields; tests place focus and hover by hand.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimpleRegistry {
    /// The focused control.
    pub active: Option<ControlId>,
    /// The hovered control.
    pub hovered: Option<ControlId>,
    /// Global read-only switch.
    pub read_only: bool,
}

impl ControlRegistry for SimpleRegistry {
    fn is_active(&self, id: ControlId) -> bool {
        self.active == Some(id)
    }

    fn is_hovered(&self, id: ControlId) -> bool {
        self.hovered == Some(id)
    }

    fn set_active(&mut self, id: ControlId) {
        self.active = Some(id);
    }

    fn clear_active(&mut self) {
        self.active = None;
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn register(&mut self, _id: ControlId, _rect: Rect) {}
}

/// A sink that records what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Filled rectangles, in submission order.
    pub rects: Vec<Rect>,
    /// Glyph runs as plain strings, with their origins.
    pub runs: Vec<(String, Point)>,
}

impl RecordingSink {
    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.runs.clear();
    }
}

impl RenderSink for RecordingSink {
    fn fill_rect(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    fn glyphs(&mut self, text: &[char], origin: Point, _layout: &TextLayout) {
        self.runs.push((text.iter().collect(), origin));
    }
}
