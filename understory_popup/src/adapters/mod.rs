// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region adapters: decorate element handler sets with popup behavior.
//!
//! Each adapter takes the handlers an element already has and returns a new
//! set where the popup's handler for every relevant interaction is
//! [chained](crate::chain::chain) in front of the existing one. Nothing the
//! caller installed is removed, and handlers for interactions the popup does
//! not care about pass through untouched.
//!
//! - [`trigger`]: click and activation keys, pointer enter/leave, focus/blur.
//! - [`content`]: pointer enter/leave (pin open, deferred close) and pointer
//!   down (focus hand-off).
//! - [`mask`]: pointer enter/leave for first-landing suppression.
//!
//! Decorated handlers hold a weak reference to their popup. Once the popup is
//! dropped they only forward to the pre-existing handlers.

use alloc::rc::{Rc, Weak};
use core::fmt;

use crate::chain::{Handler, handler};
use crate::event::PopupEvent;
use crate::popup::Shared;

pub mod content;
pub mod mask;
pub mod trigger;

/// The event handlers of one element.
pub struct Handlers<E> {
    /// Click.
    pub on_click: Option<Handler<E>>,
    /// Key down.
    pub on_key_down: Option<Handler<E>>,
    /// Pointer enter.
    pub on_mouse_enter: Option<Handler<E>>,
    /// Pointer leave.
    pub on_mouse_leave: Option<Handler<E>>,
    /// Pointer down.
    pub on_mouse_down: Option<Handler<E>>,
    /// Focus.
    pub on_focus: Option<Handler<E>>,
    /// Blur.
    pub on_blur: Option<Handler<E>>,
}

impl<E> Handlers<E> {
    /// A set with no handlers.
    pub fn new() -> Self {
        Self {
            on_click: None,
            on_key_down: None,
            on_mouse_enter: None,
            on_mouse_leave: None,
            on_mouse_down: None,
            on_focus: None,
            on_blur: None,
        }
    }

    /// Whether no handler is installed.
    pub fn is_empty(&self) -> bool {
        self.on_click.is_none()
            && self.on_key_down.is_none()
            && self.on_mouse_enter.is_none()
            && self.on_mouse_leave.is_none()
            && self.on_mouse_down.is_none()
            && self.on_focus.is_none()
            && self.on_blur.is_none()
    }
}

impl<E> Default for Handlers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Handlers<E> {
    fn clone(&self) -> Self {
        Self {
            on_click: self.on_click.clone(),
            on_key_down: self.on_key_down.clone(),
            on_mouse_enter: self.on_mouse_enter.clone(),
            on_mouse_leave: self.on_mouse_leave.clone(),
            on_mouse_down: self.on_mouse_down.clone(),
            on_focus: self.on_focus.clone(),
            on_blur: self.on_blur.clone(),
        }
    }
}

impl<E> fmt::Debug for Handlers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("on_click", &self.on_click.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_mouse_enter", &self.on_mouse_enter.is_some())
            .field("on_mouse_leave", &self.on_mouse_leave.is_some())
            .field("on_mouse_down", &self.on_mouse_down.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

/// Build a handler that runs `f` against the popup while it is alive.
pub(crate) fn bind<E: PopupEvent>(
    shared: &Rc<Shared<E>>,
    f: impl Fn(&Shared<E>, &mut E) + 'static,
) -> Handler<E> {
    let weak: Weak<Shared<E>> = Rc::downgrade(shared);
    handler(move |event: &mut E| {
        if let Some(shared) = weak.upgrade() {
            f(&shared, event);
        }
    })
}
