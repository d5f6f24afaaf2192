// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility store: controlled vs. uncontrolled open state.
//!
//! When the host supplies a visibility value the popup is *controlled*: that
//! value is authoritative and is re-applied on every update, even while timers
//! are pending. Otherwise the popup is *uncontrolled* and owns its state.
//!
//! The mode is re-derived from the latest host value on every update via the
//! pure [`VisibilityStore::resolve`]; there is no sticky mode flag.
//!
//! ```
//! use understory_popup::visibility::{VisibilityMode, VisibilityStore};
//!
//! let mut store = VisibilityStore::new(None, false);
//! store.commit(true);
//! assert!(store.is_open());
//!
//! // The host takes over.
//! store.sync(Some(false));
//! assert_eq!(store.mode(), VisibilityMode::Controlled);
//! store.commit(true);
//! assert!(!store.is_open()); // the host decides
//! assert!(store.mirror()); // but the request is remembered
//! ```

/// Who owns the open state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisibilityMode {
    /// The host supplies the value on every update.
    Controlled,
    /// The popup toggles its own state.
    Uncontrolled,
}

/// Open/closed state plus the host override.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibilityStore {
    /// Internal value: the self-managed state when uncontrolled, the most
    /// recent request (or host value) when controlled. Reset to the host value
    /// on every sync.
    mirror: bool,
    controlled: Option<bool>,
}

impl VisibilityStore {
    /// Create a store from the host's value, falling back to `default_open`.
    pub fn new(controlled: Option<bool>, default_open: bool) -> Self {
        Self {
            mirror: controlled.unwrap_or(default_open),
            controlled,
        }
    }

    /// The derived state for an update: the host value if any, else `prev`.
    pub fn resolve(prev: bool, controlled: Option<bool>) -> bool {
        controlled.unwrap_or(prev)
    }

    /// Apply the host's value for this update cycle.
    ///
    /// Resolution starts from the authoritative value, so when the host stops
    /// controlling, the popup keeps the last value the host supplied rather
    /// than a request the host never applied.
    pub fn sync(&mut self, controlled: Option<bool>) {
        self.mirror = Self::resolve(self.is_open(), controlled);
        self.controlled = controlled;
    }

    /// Record a decided visibility.
    ///
    /// Uncontrolled stores change their state. Controlled stores only update the
    /// mirror; [`VisibilityStore::is_open`] keeps reporting the host value.
    pub fn commit(&mut self, desired: bool) {
        self.mirror = desired;
    }

    /// The authoritative visibility.
    pub fn is_open(&self) -> bool {
        self.controlled.unwrap_or(self.mirror)
    }

    /// The internal mirror.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Current ownership mode.
    pub fn mode(&self) -> VisibilityMode {
        if self.controlled.is_some() {
            VisibilityMode::Controlled
        } else {
            VisibilityMode::Uncontrolled
        }
    }

    /// Whether the host owns the value.
    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }
}

impl Default for VisibilityStore {
    fn default() -> Self {
        Self::new(None, false)
    }
}
