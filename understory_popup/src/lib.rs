// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Popup: a headless visibility state machine for anchored popups.
//!
//! ## Overview
//!
//! A popup is a floating layer anchored to a trigger element. This crate decides
//! when it opens and closes, from pointer, keyboard and focus events on three
//! regions: the trigger, the floating content, and an optional mask. It does not
//! position, mount, or render anything.
//!
//! ## Pieces
//!
//! - [`chain`]: compose a new handler in front of an element's existing one.
//! - [`timer`]: keyed, cancelable deferred actions for hover delays.
//! - [`visibility`]: controlled vs. uncontrolled open state.
//! - [`engine`]: the decision state machine over [`intent::Intent`]s.
//! - [`adapters`]: decorate trigger, content and mask handler sets.
//! - [`overlay`]: props for the floating-layer collaborator.
//! - [`popup`]: the [`Popup`] handle tying it together.
//!
//! ## Trigger modes
//!
//! Any combination of [`TriggerModes::CLICK`], [`TriggerModes::HOVER`] and
//! [`TriggerModes::FOCUS`]:
//!
//! - Click toggles immediately (activation keys included).
//! - Hover opens and closes after [`PopupConfig::delay_ms`]; moving onto the
//!   content or mask keeps it open.
//! - Focus opens on focus and closes on blur, unless the blur comes from a press
//!   inside the content.
//!
//! ## Controlled visibility
//!
//! Pass `Some(visible)` to [`Popup::new`] / [`Popup::update`] to own the value.
//! The popup still reports every change it wants through its listener and
//! leaves it to the host to apply.
//!
//! ## Time
//!
//! Events carry millisecond timestamps ([`event::PopupEvent::timestamp`]) and
//! the host calls [`Popup::tick`] with the current time. Nothing fires on its
//! own, and nothing fires after [`Popup::teardown`] or drop.
//!
//! ## Example
//!
//! ```
//! use understory_popup::adapters::trigger::TriggerElement;
//! use understory_popup::event::BasicEvent;
//! use understory_popup::{Popup, PopupConfig};
//!
//! let popup: Popup<BasicEvent> = Popup::new(PopupConfig::default(), None).unwrap();
//! let trigger = popup.decorate_trigger(Some(&TriggerElement::default())).unwrap();
//!
//! let enter = trigger.handlers.on_mouse_enter.as_ref().unwrap();
//! enter(&mut BasicEvent::at(1_000));
//! assert!(!popup.is_open());
//!
//! popup.tick(1_200);
//! assert!(popup.is_open());
//! ```
//!
//! ## Features
//!
//! - `tracing`: log decisions through [`tracing`](https://docs.rs/tracing).
//! - `serde`: serialize and deserialize [`PopupConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod logging;

pub mod adapters;
pub mod chain;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod intent;
pub mod overlay;
pub mod popup;
pub mod timer;
pub mod visibility;

pub use config::{PopupConfig, TriggerModes};
pub use error::ConfigError;
pub use intent::{Reason, VisibleChange};
pub use popup::{Popup, PopupHandle};
