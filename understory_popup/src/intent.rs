// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intents raised by the adapters and the notifications the engine emits.

use alloc::borrow::Cow;
use core::fmt;

/// Requested direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Show the floating layer.
    Open,
    /// Hide the floating layer.
    Close,
}

impl Action {
    /// The visibility this action asks for.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// `Open` for `true`, `Close` for `false`.
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Close }
    }
}

/// Where an intent came from.
///
/// [`Reason::as_str`] gives the camel-case tags web hosts conventionally
/// receive in change callbacks (`"fromTrigger"`, `"fromContent"`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The trigger element.
    FromTrigger,
    /// The floating content.
    FromContent,
    /// The mask, for hosts that route mask interaction through
    /// [`Popup::request_close`](crate::popup::Popup::request_close) with their
    /// own handlers. The built-in adapters never produce it: mask landings only
    /// pin the popup open, and the floating layer reports mask clicks as
    /// [`Reason::MASK_CLICK`].
    FromMask,
    /// The floating-layer collaborator or another caller, with its own tag.
    External(Cow<'static, str>),
}

impl Reason {
    /// Outside click detected by the floating layer.
    pub const DOC_CLICK: Self = Self::External(Cow::Borrowed("docClick"));
    /// Escape key detected by the floating layer.
    pub const KEYBOARD: Self = Self::External(Cow::Borrowed("keyboard"));
    /// Click on the mask.
    pub const MASK_CLICK: Self = Self::External(Cow::Borrowed("maskClick"));

    /// An external reason with an arbitrary tag.
    pub fn external(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::External(tag.into())
    }

    /// The tag as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::FromTrigger => "fromTrigger",
            Self::FromContent => "fromContent",
            Self::FromMask => "fromMask",
            Self::External(tag) => &**tag,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized open/close request.
///
/// Intents are transient: the engine consumes them immediately or parks them in
/// its timer bank until their delay elapses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intent<E> {
    /// Requested direction.
    pub action: Action,
    /// Source tag, forwarded to the change notification.
    pub reason: Reason,
    /// The raw event that caused the request.
    pub event: E,
}

impl<E> Intent<E> {
    /// An open request.
    pub fn open(reason: Reason, event: E) -> Self {
        Self {
            action: Action::Open,
            reason,
            event,
        }
    }

    /// A close request.
    pub fn close(reason: Reason, event: E) -> Self {
        Self {
            action: Action::Close,
            reason,
            event,
        }
    }
}

/// A committed visibility change, delivered to the host's listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleChange<E> {
    /// The new desired visibility.
    pub open: bool,
    /// Why it changed.
    pub reason: Reason,
    /// The raw event that caused it.
    pub event: E,
}

impl<E> From<Intent<E>> for VisibleChange<E> {
    fn from(intent: Intent<E>) -> Self {
        Self {
            open: intent.action.is_open(),
            reason: intent.reason,
            event: intent.event,
        }
    }
}
