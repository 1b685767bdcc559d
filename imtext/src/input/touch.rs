// Copyright 2025 the Imtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! On-screen keyboard integration point.
//!
//! The OS side lives entirely in the host. The core requests the keyboard
//! every frame the active control is editable, and the host surfaces
//! [`TextEvent`]s back across frames through [`TouchKeyboardHost::poll`].
//! Hosts without touch-keyboard support are silent no-ops.

use core::ops::Range;

use crate::input::events::TextEvent;
use crate::store::ControlId;

/// Which on-screen keyboard layout to request.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TouchKeyboardType {
    /// The platform's default text keyboard.
    #[default]
    Default,
    /// A numbers-and-punctuation keyboard.
    Numeric,
}

/// Parameters for a touch-keyboard request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchKeyboardSettings {
    /// Whether the edited control accepts newlines.
    pub multiline: bool,
    /// Keyboard layout.
    pub kind: TouchKeyboardType,
    /// Maximum content length; zero means unlimited.
    pub max_len: usize,
    /// Current selection, in ascending order. The platform side rejects
    /// negative spans, so the signed selection is normalized before it gets
    /// here.
    pub selection: Range<usize>,
}

/// The host's bridge to the platform's on-screen keyboard.
pub trait TouchKeyboardHost {
    /// Whether the platform has an on-screen keyboard at all.
    fn supported(&self) -> bool {
        false
    }

    /// (Re-)requests the keyboard for `owner` with the current text.
    ///
    /// Called every frame the owning control stays active and editable;
    /// hosts deduplicate and close the keyboard when requests stop coming.
    fn request(&mut self, owner: ControlId, text: &[char], settings: &TouchKeyboardSettings);

    /// Polled once per frame for a pending text event.
    fn poll(&mut self) -> Option<TextEvent>;
}
