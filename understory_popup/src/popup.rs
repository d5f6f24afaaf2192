// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popup handle: engine, adapters, and change delivery in one place.
//!
//! A [`Popup`] owns its [`Engine`] behind an `Rc<RefCell<..>>`. Decorated
//! handlers and [`PopupHandle`]s hold weak references, so they never keep a
//! popup alive and become inert once it is gone.
//!
//! ## Per render
//!
//! 1) [`Popup::update`] with the latest configuration and controlled value.
//! 2) [`Popup::decorate_trigger`], [`Popup::decorate_content`] and, when
//!    [`OverlayProps::tracks_mask`] is set, [`Popup::decorate_mask`].
//! 3) [`Popup::overlay_props`] for the floating layer.
//!
//! Between renders, call [`Popup::tick`] when [`Popup::next_deadline`] passes.
//!
//! ## Change delivery
//!
//! The listener runs after the engine borrow is released. It may call back
//! into the popup, for example through a [`PopupHandle`] to push a new
//! controlled value.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_popup::adapters::trigger::TriggerElement;
//! use understory_popup::config::{PopupConfig, TriggerModes};
//! use understory_popup::event::BasicEvent;
//! use understory_popup::popup::Popup;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = seen.clone();
//! let popup = Popup::new(PopupConfig::default().with_modes(TriggerModes::CLICK), None)
//!     .unwrap()
//!     .with_listener(move |change| log.borrow_mut().push((change.open, change.reason.to_string())));
//!
//! let trigger = popup.decorate_trigger(Some(&TriggerElement::default())).unwrap();
//! let click = trigger.handlers.on_click.unwrap();
//! click(&mut BasicEvent::at(0));
//! click(&mut BasicEvent::at(10));
//!
//! assert_eq!(
//!     *seen.borrow(),
//!     vec![(true, "fromTrigger".to_string()), (false, "fromTrigger".to_string())]
//! );
//! ```

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use crate::adapters::trigger::{TriggerElement, TriggerProps};
use crate::adapters::{Handlers, content, mask, trigger};
use crate::config::PopupConfig;
use crate::engine::{Channel, Engine};
use crate::error::ConfigError;
use crate::event::PopupEvent;
use crate::intent::{Intent, Reason, VisibleChange};
use crate::overlay::OverlayProps;
use crate::visibility::VisibilityMode;

/// Receives every committed visibility change.
pub type Listener<E> = Rc<dyn Fn(&VisibleChange<E>)>;

/// State shared between a popup, its handles and its decorated handlers.
pub(crate) struct Shared<E> {
    engine: RefCell<Engine<E>>,
    listener: RefCell<Option<Listener<E>>>,
}

impl<E: PopupEvent> Shared<E> {
    pub(crate) fn with_engine<R>(&self, f: impl FnOnce(&mut Engine<E>) -> R) -> R {
        f(&mut self.engine.borrow_mut())
    }

    pub(crate) fn is_open(&self) -> bool {
        self.engine.borrow().is_open()
    }

    pub(crate) fn dispatch(&self, intent: Intent<E>, channel: Channel) {
        let change = self.with_engine(|engine| engine.dispatch(intent, channel));
        self.emit(change);
    }

    fn emit(&self, change: Option<VisibleChange<E>>) {
        let Some(change) = change else {
            return;
        };
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(&change);
        }
    }
}

/// A popup instance.
///
/// Dropping it (or calling [`Popup::teardown`]) cancels all pending timers.
pub struct Popup<E: PopupEvent> {
    shared: Rc<Shared<E>>,
}

impl<E: PopupEvent> Popup<E> {
    /// Create a popup. `visible` is the host's controlled value, if any.
    pub fn new(config: PopupConfig, visible: Option<bool>) -> Result<Self, ConfigError> {
        let engine = Engine::new(config, visible)?;
        Ok(Self {
            shared: Rc::new(Shared {
                engine: RefCell::new(engine),
                listener: RefCell::new(None),
            }),
        })
    }

    /// Set the change listener, builder style.
    pub fn with_listener(self, listener: impl Fn(&VisibleChange<E>) + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Replace the change listener.
    pub fn set_listener(&self, listener: impl Fn(&VisibleChange<E>) + 'static) {
        *self.shared.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// Remove the change listener.
    pub fn clear_listener(&self) {
        *self.shared.listener.borrow_mut() = None;
    }

    /// Apply the host's props for this update cycle.
    ///
    /// The controlled value is applied even if `config` is rejected.
    pub fn update(&self, config: PopupConfig, visible: Option<bool>) -> Result<(), ConfigError> {
        self.shared
            .with_engine(|engine| engine.sync_props(config, visible))
    }

    /// Apply only the host's controlled value.
    pub fn sync_visible(&self, visible: Option<bool>) {
        self.shared.with_engine(|engine| engine.sync_visible(visible));
    }

    /// Decorate the trigger. Returns `None` when there is no trigger.
    pub fn decorate_trigger(&self, element: Option<&TriggerElement<E>>) -> Option<TriggerProps<E>> {
        element.map(|element| trigger::decorate(&self.shared, element))
    }

    /// Decorate the floating content's handlers.
    pub fn decorate_content(&self, existing: &Handlers<E>) -> Handlers<E> {
        content::decorate(&self.shared, existing)
    }

    /// Decorate the mask's handlers. Unchanged unless the popup tracks the mask.
    pub fn decorate_mask(&self, existing: &Handlers<E>) -> Handlers<E> {
        mask::decorate(&self.shared, existing)
    }

    /// Props for the floating layer.
    ///
    /// `trigger` leads the safe-node list and is the anchor unless `target` is
    /// given.
    pub fn overlay_props<N: Clone>(
        &self,
        trigger: Option<N>,
        target: Option<N>,
        extra_safe_nodes: impl IntoIterator<Item = N>,
    ) -> OverlayProps<N> {
        let engine = self.shared.engine.borrow();
        OverlayProps::build(
            engine.config(),
            engine.is_open(),
            trigger,
            target,
            extra_safe_nodes,
        )
    }

    /// Close at the request of the floating layer.
    pub fn request_close(&self, reason: Reason, event: E) {
        self.shared
            .dispatch(Intent::close(reason, event), Channel::External);
    }

    /// Open programmatically.
    pub fn request_open(&self, reason: Reason, event: E) {
        self.shared
            .dispatch(Intent::open(reason, event), Channel::External);
    }

    /// Fire every timer due at `now` and deliver the resulting changes.
    ///
    /// Returns how many changes were delivered.
    pub fn tick(&self, now: u64) -> usize {
        let mut delivered = 0;
        loop {
            let fired = self.shared.with_engine(|engine| engine.fire_next_due(now));
            let Some(fired) = fired else {
                break;
            };
            if fired.change.is_some() {
                delivered += 1;
            }
            self.shared.emit(fired.change);
        }
        delivered
    }

    /// When [`Popup::tick`] next has work, if ever.
    pub fn next_deadline(&self) -> Option<u64> {
        self.shared.engine.borrow().next_deadline()
    }

    /// The authoritative visibility.
    pub fn is_open(&self) -> bool {
        self.shared.is_open()
    }

    /// Controlled or uncontrolled.
    pub fn mode(&self) -> VisibilityMode {
        self.shared.engine.borrow().mode()
    }

    /// Run `f` with read access to the engine.
    pub fn inspect<R>(&self, f: impl FnOnce(&Engine<E>) -> R) -> R {
        f(&self.shared.engine.borrow())
    }

    /// A weak handle for collaborators.
    pub fn handle(&self) -> PopupHandle<E> {
        PopupHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Cancel every timer and make all decorated handlers inert.
    pub fn teardown(&self) {
        self.shared.with_engine(|engine| engine.teardown());
    }
}

impl<E: PopupEvent> Drop for Popup<E> {
    fn drop(&mut self) {
        // A handler may be mid-dispatch on this popup when the host drops it.
        if let Ok(mut engine) = self.shared.engine.try_borrow_mut() {
            engine.teardown();
        }
    }
}

impl<E: PopupEvent> fmt::Debug for Popup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.shared.engine.try_borrow();
        let mut s = f.debug_struct("Popup");
        if let Ok(engine) = engine {
            s.field("open", &engine.is_open())
                .field("mode", &engine.mode())
                .field("pending_timers", &engine.timers().len())
                .field("torn_down", &engine.is_torn_down());
        }
        s.field("has_listener", &self.shared.listener.borrow().is_some())
            .finish_non_exhaustive()
    }
}

/// A weak reference to a popup, for the floating layer and listeners.
pub struct PopupHandle<E: PopupEvent> {
    shared: Weak<Shared<E>>,
}

impl<E: PopupEvent> PopupHandle<E> {
    /// Close the popup. Returns `false` if the popup is gone.
    pub fn request_close(&self, reason: Reason, event: E) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        shared.dispatch(Intent::close(reason, event), Channel::External);
        true
    }

    /// Apply a controlled value. Returns `false` if the popup is gone.
    pub fn sync_visible(&self, visible: Option<bool>) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        shared.with_engine(|engine| engine.sync_visible(visible));
        true
    }

    /// The popup's visibility, `None` if it is gone.
    pub fn is_open(&self) -> Option<bool> {
        self.shared.upgrade().map(|shared| shared.is_open())
    }

    /// Whether the popup still exists.
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }
}

impl<E: PopupEvent> Clone for PopupHandle<E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E: PopupEvent> fmt::Debug for PopupHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
