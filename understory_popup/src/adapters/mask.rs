// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mask adapter.
//!
//! Only pure hover popups with a mask decorate it. The first landing on the
//! mask after it is armed cancels a pending close; see
//! [`MaskLanding`](crate::config::MaskLanding) for what re-arms it.

use alloc::rc::Rc;

use super::{Handlers, bind};
use crate::chain::chain_into;
use crate::event::PopupEvent;
use crate::popup::Shared;

pub(crate) fn decorate<E: PopupEvent>(shared: &Rc<Shared<E>>, existing: &Handlers<E>) -> Handlers<E> {
    let mut handlers = existing.clone();
    if !shared.with_engine(|engine| engine.config().tracks_mask()) {
        return handlers;
    }
    chain_into(
        &mut handlers.on_mouse_enter,
        bind(shared, |shared, _: &mut E| {
            shared.with_engine(|engine| engine.mask_enter());
        }),
    );
    chain_into(
        &mut handlers.on_mouse_leave,
        bind(shared, |shared, _: &mut E| {
            shared.with_engine(|engine| engine.mask_leave());
        }),
    );
    handlers
}
