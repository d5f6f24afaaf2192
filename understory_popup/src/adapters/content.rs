// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content adapter.
//!
//! In hover mode, entering the content cancels a pending close and leaving it
//! schedules one tagged [`Reason::FromContent`]. In focus mode, a press inside
//! the content marks the next trigger blur as a focus hand-off.

use alloc::rc::Rc;

use super::{Handlers, bind};
use crate::chain::chain_into;
use crate::config::TriggerModes;
use crate::engine::Channel;
use crate::event::PopupEvent;
use crate::intent::{Intent, Reason};
use crate::popup::Shared;

pub(crate) fn decorate<E: PopupEvent>(shared: &Rc<Shared<E>>, existing: &Handlers<E>) -> Handlers<E> {
    let modes = shared.with_engine(|engine| engine.config().modes);
    let mut handlers = existing.clone();

    if modes.contains(TriggerModes::FOCUS) {
        chain_into(
            &mut handlers.on_mouse_down,
            bind(shared, |shared, _: &mut E| {
                shared.with_engine(|engine| engine.forward_to_content());
            }),
        );
    }
    if modes.contains(TriggerModes::HOVER) {
        chain_into(
            &mut handlers.on_mouse_enter,
            bind(shared, |shared, _: &mut E| {
                shared.with_engine(|engine| engine.pin_open());
            }),
        );
        chain_into(
            &mut handlers.on_mouse_leave,
            bind(shared, |shared, event: &mut E| {
                shared.dispatch(
                    Intent::close(Reason::FromContent, event.clone()),
                    Channel::Hover,
                );
            }),
        );
    }
    handlers
}
