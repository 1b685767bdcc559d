// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared test environment: a fixed-advance shaper, scripted input, and
//! a recording sink wired into an [`EditDriver`].

use imtext::testing::{MonoShaper, RecordingSink, SimpleRegistry};
use imtext::{
    CaretState, ControlId, EditDriver, EditOptions, EditResponse, Platform, Point, QueuedInput,
    Rect, TextArena, TextBuffer,
};

/// A control rectangle of 20×4 cells under the default [`MonoShaper`].
pub const RECT: Rect = Rect::new(0.0, 0.0, 160.0, 64.0);

/// The control id used by single-control scenarios.
pub const ID: ControlId = ControlId(1);

pub fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// One frame's collaborators plus the clock.
pub struct Env {
    pub shaper: MonoShaper,
    pub input: QueuedInput,
    pub registry: SimpleRegistry,
    pub sink: RecordingSink,
    pub arena: TextArena,
    pub time: f64,
}

impl Env {
    pub fn new() -> Self {
        Self {
            shaper: MonoShaper::default(),
            input: QueuedInput::new(),
            registry: SimpleRegistry::default(),
            sink: RecordingSink::default(),
            arena: TextArena::new(),
            time: 0.0,
        }
    }

    /// Starts the next frame: advances the clock, resets the arena and the
    /// sink, and fixes the frame's view of the input.
    pub fn frame(&mut self) {
        self.time += 1.0 / 60.0;
        self.arena.reset();
        self.sink.clear();
        self.input.begin_frame(self.time);
    }

    /// Focuses and hovers the control, as an earlier click would have.
    pub fn focus(&mut self, id: ControlId) {
        self.registry.active = Some(id);
        self.registry.hovered = Some(id);
    }

    /// Puts the pointer at cell `(column, line)`.
    pub fn point_at_cell(&mut self, column: f32, line: f32) {
        self.input.set_pointer_position(Point::new(
            RECT.x + column * self.shaper.advance,
            RECT.y + (line + 0.5) * self.shaper.line_height,
        ));
    }

    pub fn driver(&mut self) -> EditDriver<'_> {
        EditDriver {
            shaper: &self.shaper,
            input: &mut self.input,
            registry: &mut self.registry,
            arena: &mut self.arena,
            sink: &mut self.sink,
            platform: Platform::Generic,
        }
    }

    /// Runs one editing pass over a persistent store.
    pub fn edit(
        &mut self,
        id: ControlId,
        store: &mut Vec<char>,
        state: &mut CaretState,
        options: &EditOptions,
    ) -> EditResponse {
        let mut driver = self.driver();
        let mut buffer = TextBuffer::persistent(store, 0);
        driver.text_edit(id, &mut buffer, state, RECT, options)
    }
}
