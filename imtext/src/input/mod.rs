// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events, bounded queues, and the input-source boundary.

mod events;
mod keymap;
mod queue;
mod source;
mod touch;

pub use self::events::{
    Key, KeyEvent, KeyState, Modifiers, PointerDevice, PointerEvent, PointerEventKind, TextEvent,
};
pub use self::keymap::{command_for_event, KeyCommand, Platform};
pub use self::queue::EventQueue;
pub use self::source::{InputSource, QueuedInput, KEYBOARD_QUEUE_SIZE, POINTER_QUEUE_SIZE};
pub use self::touch::{TouchKeyboardHost, TouchKeyboardSettings, TouchKeyboardType};
