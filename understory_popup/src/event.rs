// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event surface the adapters need from host events.
//!
//! The popup treats events as opaque payloads that it forwards to
//! [`VisibleChange`](crate::intent::VisibleChange) notifications. It only needs
//! three things from them: a timestamp to schedule delays against, a key code
//! for keyboard activation, and a way to prevent the default action.

/// Keyboard key code, in the DOM `keyCode` numbering.
pub type KeyCode = u32;

/// Common key codes.
pub mod keycode {
    use super::KeyCode;

    /// Enter / Return.
    pub const ENTER: KeyCode = 13;
    /// Escape.
    pub const ESC: KeyCode = 27;
    /// Space bar.
    pub const SPACE: KeyCode = 32;
}

/// Host event as seen by the popup.
pub trait PopupEvent: Clone + 'static {
    /// Event timestamp in milliseconds, on the same clock the host passes to
    /// [`Popup::tick`](crate::popup::Popup::tick).
    fn timestamp(&self) -> u64;

    /// Key code for keyboard events, `None` for everything else.
    fn key_code(&self) -> Option<KeyCode> {
        None
    }

    /// Suppress the host's default action for this event.
    fn prevent_default(&mut self) {}
}

/// A minimal concrete event, handy for tests and simple hosts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BasicEvent {
    /// Timestamp in milliseconds.
    pub timestamp: u64,
    /// Key code for keyboard events.
    pub key_code: Option<KeyCode>,
    /// Set by [`PopupEvent::prevent_default`].
    pub default_prevented: bool,
}

impl BasicEvent {
    /// A pointer or focus event at `timestamp`.
    pub fn at(timestamp: u64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// A key event at `timestamp`.
    pub fn key(timestamp: u64, key_code: KeyCode) -> Self {
        Self {
            timestamp,
            key_code: Some(key_code),
            default_prevented: false,
        }
    }
}

impl PopupEvent for BasicEvent {
    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn key_code(&self) -> Option<KeyCode> {
        self.key_code
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
