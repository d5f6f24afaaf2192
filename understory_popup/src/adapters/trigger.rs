// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger adapter.
//!
//! | mode    | handlers decorated                          |
//! | ------- | ------------------------------------------- |
//! | `CLICK` | `on_click`, `on_key_down` (activation keys) |
//! | `HOVER` | `on_mouse_enter`, `on_mouse_leave`          |
//! | `FOCUS` | `on_focus`, `on_blur`                       |
//!
//! A disabled popup decorates nothing but still reports its aria state.

use alloc::rc::Rc;
use alloc::string::String;

use super::{Handlers, bind};
use crate::chain::chain_into;
use crate::config::TriggerModes;
use crate::engine::Channel;
use crate::event::PopupEvent;
use crate::intent::{Action, Intent, Reason};
use crate::popup::Shared;

/// The trigger element as the host has it before decoration.
#[derive(Clone, Debug)]
pub struct TriggerElement<E> {
    /// Handlers already on the element.
    pub handlers: Handlers<E>,
    /// The element's own `aria-describedby`, if any.
    pub aria_describedby: Option<String>,
}

impl<E> TriggerElement<E> {
    /// A trigger with the given handlers and no aria description.
    pub fn new(handlers: Handlers<E>) -> Self {
        Self {
            handlers,
            aria_describedby: None,
        }
    }

    /// Attach an `aria-describedby` reference.
    pub fn with_describedby(mut self, id: impl Into<String>) -> Self {
        self.aria_describedby = Some(id.into());
        self
    }
}

impl<E> Default for TriggerElement<E> {
    fn default() -> Self {
        Self::new(Handlers::new())
    }
}

/// The decorated trigger.
#[derive(Clone, Debug)]
pub struct TriggerProps<E> {
    /// Decorated handlers.
    pub handlers: Handlers<E>,
    /// Always `true`.
    pub aria_haspopup: bool,
    /// The popup's visibility.
    pub aria_expanded: bool,
    /// The element's `aria-describedby`, only while open.
    pub aria_describedby: Option<String>,
    /// The element's `aria-describedby` as received, open or not.
    element_describedby: Option<String>,
}

impl<E> TriggerProps<E> {
    /// Turn the decorated trigger back into an element, so another popup can
    /// decorate it on top.
    ///
    /// The element keeps its own `aria-describedby` even while this popup is
    /// closed.
    pub fn into_element(self) -> TriggerElement<E> {
        TriggerElement {
            handlers: self.handlers,
            aria_describedby: self.element_describedby,
        }
    }
}

pub(crate) fn decorate<E: PopupEvent>(
    shared: &Rc<Shared<E>>,
    element: &TriggerElement<E>,
) -> TriggerProps<E> {
    let (open, modes, disabled) = shared.with_engine(|engine| {
        let config = engine.config();
        (engine.is_open(), config.modes, config.disabled)
    });
    let mut handlers = element.handlers.clone();

    if !disabled {
        if modes.contains(TriggerModes::CLICK) {
            chain_into(&mut handlers.on_click, bind(shared, click));
            chain_into(
                &mut handlers.on_key_down,
                bind(shared, |shared, event: &mut E| {
                    let Some(key) = event.key_code() else {
                        return;
                    };
                    if shared.with_engine(|engine| engine.config().is_click_key(key)) {
                        event.prevent_default();
                        click(shared, event);
                    }
                }),
            );
        }
        if modes.contains(TriggerModes::HOVER) {
            chain_into(
                &mut handlers.on_mouse_enter,
                bind(shared, |shared, event: &mut E| {
                    shared.dispatch(
                        Intent::open(Reason::FromTrigger, event.clone()),
                        Channel::Hover,
                    );
                }),
            );
            chain_into(
                &mut handlers.on_mouse_leave,
                bind(shared, |shared, event: &mut E| {
                    shared.dispatch(
                        Intent::close(Reason::FromTrigger, event.clone()),
                        Channel::Hover,
                    );
                }),
            );
        }
        if modes.contains(TriggerModes::FOCUS) {
            chain_into(
                &mut handlers.on_focus,
                bind(shared, |shared, event: &mut E| {
                    shared.dispatch(
                        Intent::open(Reason::FromTrigger, event.clone()),
                        Channel::Focus,
                    );
                }),
            );
            chain_into(
                &mut handlers.on_blur,
                bind(shared, |shared, event: &mut E| {
                    shared.dispatch(
                        Intent::close(Reason::FromTrigger, event.clone()),
                        Channel::Focus,
                    );
                }),
            );
        }
    }

    TriggerProps {
        handlers,
        aria_haspopup: true,
        aria_expanded: open,
        aria_describedby: if open {
            element.aria_describedby.clone()
        } else {
            None
        },
        element_describedby: element.aria_describedby.clone(),
    }
}

/// Toggle from the trigger.
fn click<E: PopupEvent>(shared: &Shared<E>, event: &mut E) {
    let action = Action::from_open(!shared.is_open());
    let intent = Intent {
        action,
        reason: Reason::FromTrigger,
        event: event.clone(),
    };
    shared.dispatch(intent, Channel::Click);
}
