// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret state, movement algorithms, and edit operations.

pub mod motion;
pub mod ops;

mod state;

pub use self::state::CaretState;
