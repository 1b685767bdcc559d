// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text editing for immediate-mode UIs.
//!
//! Imtext is the text-editing engine of an immediate-mode toolkit, on its
//! own: the caret/selection state machine, the lazily promoting text buffer,
//! the view↔model coordinate mapping, and the per-frame dispatcher that
//! turns pointer, keyboard, and platform text events into edits. Shaping,
//! rendering, and OS integration stay in the host, behind the
//! [`TextShaper`], [`RenderSink`], [`InputSource`], and
//! [`TouchKeyboardHost`](input::TouchKeyboardHost) traits.
//!
//! The frame protocol is cooperative and single-threaded:
//!
//! 1. the host feeds OS events into a [`QueuedInput`] as they arrive;
//! 2. at the start of a frame it resets the [`TextArena`], advances the
//!    [`WidgetStore`], and calls [`QueuedInput::begin_frame`];
//! 3. for each text control it builds a [`TextBuffer`] — borrowed for
//!    display-only controls, over persistent storage for the one being
//!    edited — and runs [`EditDriver::text_edit`];
//! 4. the driver reports whether the content changed and how far to scroll
//!    to keep the caret visible.
//!
//! Buffers never outlive the frame unless they are backed by caller-managed
//! storage; everything transient lives in the arena and vanishes at the next
//! reset.

#![forbid(unsafe_code)]

pub mod arena;
pub mod buffer;
pub mod driver;
pub mod editing;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod numeric;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use arena::TextArena;
pub use buffer::TextBuffer;
pub use driver::{ControlRegistry, EditDriver, EditOptions, EditResponse, RenderSink};
pub use editing::CaretState;
pub use geometry::{Point, Rect};
pub use input::{InputSource, KeyCommand, Platform, QueuedInput, TextEvent};
pub use layout::{LayoutOptions, Line, TextLayout, TextShaper};
pub use numeric::{NumberKind, NumberValue};
pub use store::{ControlId, IdStack, WidgetStore};
