// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility decision engine.
//!
//! The engine consumes [`Intent`]s tagged with the [`Channel`] they arrived on,
//! applies the delay and close policies, and commits the result to its
//! [`VisibilityStore`]. Every committed change is returned as a
//! [`VisibleChange`] for the caller to deliver; the engine never calls out.
//!
//! ## Rules
//!
//! - **Hover**: open and close are deferred by [`PopupConfig::delay_ms`].
//!   Entering the trigger cancels both pending timers; leaving cancels a pending
//!   open. Content and mask entry cancel a pending close ("pin open").
//! - **Click**: immediate. Closing is ignored while
//!   [`PopupConfig::can_close_by_trigger`] is `false`.
//! - **Focus**: immediate. A blur right after a press inside the content is
//!   swallowed once, so focus can move into the content.
//! - **External**: immediate, and cancels pending hover timers.
//!
//! A commit that would not change the authoritative visibility produces no
//! change, unless the popup is controlled and
//! [`PopupConfig::reannounce_controlled`] is set.
//!
//! ## Time
//!
//! There is no clock. Delays are scheduled against [`PopupEvent::timestamp`]
//! and fired by [`Engine::fire_next_due`].
//!
//! ```
//! use understory_popup::config::PopupConfig;
//! use understory_popup::engine::{Channel, Engine};
//! use understory_popup::event::BasicEvent;
//! use understory_popup::intent::{Intent, Reason};
//!
//! let mut engine = Engine::new(PopupConfig::default(), None).unwrap();
//! let enter = Intent::open(Reason::FromTrigger, BasicEvent::at(0));
//! assert!(engine.dispatch(enter, Channel::Hover).is_none());
//!
//! assert!(engine.fire_next_due(199).is_none());
//! let fired = engine.fire_next_due(200).unwrap();
//! assert!(fired.change.unwrap().open);
//! assert!(engine.is_open());
//! ```

use crate::config::{HoverClosePolicy, MaskLanding, PopupConfig, TriggerModes};
use crate::error::ConfigError;
use crate::event::PopupEvent;
use crate::intent::{Action, Intent, Reason, VisibleChange};
use crate::logging;
use crate::timer::{TimerBank, TimerKey};
use crate::visibility::{VisibilityMode, VisibilityStore};

/// The interaction an intent arrived through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Click or activation key on the trigger.
    Click,
    /// Pointer enter/leave on the trigger or content.
    Hover,
    /// Focus/blur on the trigger.
    Focus,
    /// Programmatic request, e.g. from the floating layer.
    External,
}

impl Channel {
    fn mode(self) -> Option<TriggerModes> {
        match self {
            Self::Click => Some(TriggerModes::CLICK),
            Self::Hover => Some(TriggerModes::HOVER),
            Self::Focus => Some(TriggerModes::FOCUS),
            Self::External => None,
        }
    }
}

/// A timer that came due, and what committing its intent produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<E> {
    /// Slot the timer was scheduled under.
    pub key: TimerKey,
    /// The change it committed, if any.
    pub change: Option<VisibleChange<E>>,
}

/// The popup state machine.
#[derive(Clone, Debug)]
pub struct Engine<E> {
    config: PopupConfig,
    store: VisibilityStore,
    timers: TimerBank<Intent<E>>,
    /// Set by a press inside the content; swallows the next trigger blur.
    forward_content: bool,
    /// Whether the next mask landing pins the popup open.
    mask_armed: bool,
    torn_down: bool,
}

impl<E: PopupEvent> Engine<E> {
    /// Create an engine.
    ///
    /// `controlled` is the host's visibility value, `None` for uncontrolled.
    pub fn new(config: PopupConfig, controlled: Option<bool>) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = VisibilityStore::new(controlled, config.default_visible);
        Ok(Self {
            config,
            store,
            timers: TimerBank::new(),
            forward_content: false,
            mask_armed: true,
            torn_down: false,
        })
    }

    /// Apply a host update: the visibility value first, then the configuration.
    ///
    /// The visibility is always synced. An invalid configuration is rejected
    /// and the previous one stays in effect.
    pub fn sync_props(
        &mut self,
        config: PopupConfig,
        controlled: Option<bool>,
    ) -> Result<(), ConfigError> {
        self.sync_visible(controlled);
        if let Err(err) = config.validate() {
            logging::warn!(%err, "rejected popup configuration update");
            return Err(err);
        }
        self.config = config;
        Ok(())
    }

    /// Apply the host's visibility value for this update.
    pub fn sync_visible(&mut self, controlled: Option<bool>) {
        self.store.sync(controlled);
    }

    /// Feed an intent through the rules for `channel`.
    pub fn dispatch(&mut self, intent: Intent<E>, channel: Channel) -> Option<VisibleChange<E>> {
        if self.torn_down || !self.accepts(channel, &intent.reason) {
            return None;
        }
        match (channel, intent.action) {
            (Channel::Hover, Action::Open) => {
                self.mask_armed = true;
                self.timers.cancel(TimerKey::Hide);
                self.timers.cancel(TimerKey::Show);
                if !self.is_open() {
                    let now = intent.event.timestamp();
                    self.timers
                        .schedule(TimerKey::Show, now, self.config.delay_ms, intent);
                }
                None
            }
            (Channel::Hover, Action::Close) => {
                self.timers.cancel(TimerKey::Show);
                if !self.is_open() {
                    return None;
                }
                if self.config.hover_close == HoverClosePolicy::RespectCanCloseByTrigger
                    && !self.config.can_close_by_trigger
                {
                    logging::trace!("hover close blocked by can_close_by_trigger");
                    return None;
                }
                let now = intent.event.timestamp();
                self.timers
                    .schedule(TimerKey::Hide, now, self.config.delay_ms, intent);
                None
            }
            (Channel::Click, Action::Close) if !self.config.can_close_by_trigger => {
                logging::trace!("trigger close ignored: can_close_by_trigger is false");
                None
            }
            (Channel::Focus, Action::Close) if self.forward_content => {
                logging::trace!("blur swallowed: focus moving into content");
                self.forward_content = false;
                None
            }
            (Channel::Focus, Action::Close) => {
                self.forward_content = false;
                self.commit(intent)
            }
            (Channel::External, _) => {
                self.timers.cancel(TimerKey::Show);
                self.timers.cancel(TimerKey::Hide);
                self.commit(intent)
            }
            (Channel::Click | Channel::Focus, _) => self.commit(intent),
        }
    }

    /// Close at the request of the floating layer or another external caller.
    pub fn request_close(&mut self, reason: Reason, event: E) -> Option<VisibleChange<E>> {
        self.dispatch(Intent::close(reason, event), Channel::External)
    }

    /// The pointer reached the content: cancel a pending hover close.
    pub fn pin_open(&mut self) {
        if !self.torn_down {
            self.timers.cancel(TimerKey::Hide);
        }
    }

    /// A press inside the content: the next trigger blur is a hand-off, not a
    /// close.
    pub fn forward_to_content(&mut self) {
        if !self.torn_down {
            self.forward_content = true;
        }
    }

    /// The pointer landed on the mask.
    ///
    /// While armed this pins the popup open and disarms.
    pub fn mask_enter(&mut self) {
        if self.torn_down || !self.mask_armed {
            return;
        }
        self.timers.cancel(TimerKey::Hide);
        self.mask_armed = false;
    }

    /// The pointer left the mask.
    pub fn mask_leave(&mut self) {
        self.mask_armed = match self.config.mask_landing {
            MaskLanding::Rearm => true,
            MaskLanding::OncePerTriggerEntry => false,
        };
    }

    /// Fire the earliest timer due at `now`, if any.
    ///
    /// Call until it returns `None` to drain everything due.
    pub fn fire_next_due(&mut self, now: u64) -> Option<Fired<E>> {
        if self.torn_down {
            return None;
        }
        let (key, intent) = self.timers.pop_due(now)?;
        let change = self.commit(intent);
        Some(Fired { key, change })
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Cancel every timer and stop reacting to input for good.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.timers.dispose();
        self.forward_content = false;
        self.torn_down = true;
        logging::debug!("popup torn down");
    }

    /// The authoritative visibility.
    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }

    /// Controlled or uncontrolled.
    pub fn mode(&self) -> VisibilityMode {
        self.store.mode()
    }

    /// The visibility store.
    pub fn store(&self) -> &VisibilityStore {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Pending timers.
    pub fn timers(&self) -> &TimerBank<Intent<E>> {
        &self.timers
    }

    /// Whether the next trigger blur will be swallowed.
    pub fn is_forwarding_to_content(&self) -> bool {
        self.forward_content
    }

    /// Whether the next mask landing pins the popup open.
    pub fn is_mask_armed(&self) -> bool {
        self.mask_armed
    }

    /// Whether [`Engine::teardown`] has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// `disabled` only silences the trigger; content keeps closing the popup.
    fn accepts(&self, channel: Channel, reason: &Reason) -> bool {
        let Some(mode) = channel.mode() else {
            return true;
        };
        if self.config.disabled && *reason == Reason::FromTrigger {
            return false;
        }
        self.config.modes.contains(mode)
    }

    fn commit(&mut self, intent: Intent<E>) -> Option<VisibleChange<E>> {
        let desired = intent.action.is_open();
        let reannounce = self.store.is_controlled() && self.config.reannounce_controlled;
        if desired == self.store.is_open() && !reannounce {
            logging::trace!(desired, "visibility unchanged; nothing to announce");
            return None;
        }
        self.store.commit(desired);
        logging::debug!(
            open = desired,
            reason = %intent.reason,
            controlled = self.store.is_controlled(),
            "popup visibility change"
        );
        Some(intent.into())
    }
}
