// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named, cancelable deferred actions.
//!
//! A [`TimerBank`] holds at most one pending action per [`TimerKey`]. It owns no
//! clock: callers pass the current time to [`TimerBank::schedule`] and poll due
//! actions with [`TimerBank::pop_due`].
//!
//! ## Guarantees
//!
//! - Scheduling under a key drops whatever was pending under that key.
//! - An action never comes out of [`TimerBank::pop_due`] after its key was
//!   cancelled or rescheduled.
//! - After [`TimerBank::dispose`] nothing is pending and nothing can be scheduled.
//!
//! ```
//! use understory_popup::timer::{TimerBank, TimerKey};
//!
//! let mut bank: TimerBank<&str> = TimerBank::new();
//! bank.schedule(TimerKey::Show, 0, 200, "first");
//! bank.schedule(TimerKey::Show, 50, 200, "second");
//!
//! assert_eq!(bank.pop_due(249), None);
//! assert_eq!(bank.pop_due(250), Some((TimerKey::Show, "second")));
//! assert!(bank.is_empty());
//! ```

use hashbrown::HashMap;

use crate::logging;

/// Purpose of a pending action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// Deferred open in hover mode.
    Show,
    /// Deferred close in hover mode.
    Hide,
    /// General one-off slot.
    General,
}

#[derive(Clone, Debug)]
struct Pending<A> {
    deadline: u64,
    seq: u64,
    action: A,
}

/// A set of keyed, cancelable deferred actions.
#[derive(Clone, Debug)]
pub struct TimerBank<A> {
    pending: HashMap<TimerKey, Pending<A>>,
    /// Scheduling order, used to break deadline ties.
    next_seq: u64,
    disposed: bool,
}

impl<A> TimerBank<A> {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            next_seq: 0,
            disposed: false,
        }
    }

    /// Schedule `action` to become due `delay_ms` after `now`.
    ///
    /// Anything pending under `key` is dropped first. Returns `false` and drops
    /// `action` if the bank has been disposed.
    pub fn schedule(&mut self, key: TimerKey, now: u64, delay_ms: u64, action: A) -> bool {
        if self.disposed {
            logging::trace!(?key, "timer bank disposed; schedule refused");
            return false;
        }
        let deadline = now.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(
            key,
            Pending {
                deadline,
                seq,
                action,
            },
        );
        logging::trace!(?key, deadline, "timer scheduled");
        true
    }

    /// Cancel the action pending under `key`, returning it if there was one.
    pub fn cancel(&mut self, key: TimerKey) -> Option<A> {
        let cancelled = self.pending.remove(&key).map(|p| p.action);
        if cancelled.is_some() {
            logging::trace!(?key, "timer cancelled");
        }
        cancelled
    }

    /// Cancel every pending action, whatever its key.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Cancel everything and refuse all future scheduling.
    pub fn dispose(&mut self) {
        self.cancel_all();
        self.disposed = true;
    }

    /// Whether [`TimerBank::dispose`] has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether an action is pending under `key`.
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Deadline of the action pending under `key`.
    pub fn deadline(&self, key: TimerKey) -> Option<u64> {
        self.pending.get(&key).map(|p| p.deadline)
    }

    /// Earliest deadline across all keys.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest action due at `now`.
    ///
    /// Ties on deadline resolve in scheduling order. Call repeatedly to drain
    /// everything due; each call observes cancellations made in between.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerKey, A)> {
        let key = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(k, _)| *k)?;
        let pending = self.pending.remove(&key)?;
        logging::trace!(?key, deadline = pending.deadline, now, "timer fired");
        Some((key, pending.action))
    }
}

impl<A> Default for TimerBank<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_deadline_not_before() {
        let mut bank = TimerBank::new();
        assert!(bank.schedule(TimerKey::Hide, 1000, 200, 'h'));
        assert_eq!(bank.deadline(TimerKey::Hide), Some(1200));
        assert_eq!(bank.pop_due(1199), None);
        assert_eq!(bank.pop_due(1200), Some((TimerKey::Hide, 'h')));
        assert_eq!(bank.pop_due(5000), None);
    }

    #[test]
    fn reschedule_replaces_pending_action() {
        let mut bank = TimerBank::new();
        bank.schedule(TimerKey::Show, 0, 100, 1);
        bank.schedule(TimerKey::Show, 10, 100, 2);
        assert_eq!(bank.len(), 1);
        // The first deadline passes without the replaced action firing.
        assert_eq!(bank.pop_due(100), None);
        assert_eq!(bank.pop_due(110), Some((TimerKey::Show, 2)));
    }

    #[test]
    fn cancel_returns_action_and_prevents_firing() {
        let mut bank = TimerBank::new();
        bank.schedule(TimerKey::Show, 0, 10, "show");
        assert_eq!(bank.cancel(TimerKey::Show), Some("show"));
        assert_eq!(bank.cancel(TimerKey::Show), None);
        assert_eq!(bank.pop_due(u64::MAX), None);
    }

    #[test]
    fn keys_are_independent() {
        let mut bank = TimerBank::new();
        bank.schedule(TimerKey::Show, 0, 10, "show");
        bank.schedule(TimerKey::Hide, 0, 20, "hide");
        bank.schedule(TimerKey::General, 0, 5, "general");
        assert_eq!(bank.next_deadline(), Some(5));
        bank.cancel(TimerKey::Show);
        assert!(bank.is_pending(TimerKey::Hide));
        assert!(bank.is_pending(TimerKey::General));
        assert!(!bank.is_pending(TimerKey::Show));
    }

    #[test]
    fn due_actions_come_out_in_deadline_then_schedule_order() {
        let mut bank = TimerBank::new();
        bank.schedule(TimerKey::Hide, 0, 30, "hide");
        bank.schedule(TimerKey::General, 10, 20, "general");
        bank.schedule(TimerKey::Show, 0, 10, "show");
        assert_eq!(bank.pop_due(100), Some((TimerKey::Show, "show")));
        // Equal deadlines: `hide` was scheduled first.
        assert_eq!(bank.pop_due(100), Some((TimerKey::Hide, "hide")));
        assert_eq!(bank.pop_due(100), Some((TimerKey::General, "general")));
        assert_eq!(bank.pop_due(100), None);
    }

    #[test]
    fn dispose_cancels_everything_and_refuses_new_work() {
        let mut bank = TimerBank::new();
        bank.schedule(TimerKey::Show, 0, 10, ());
        bank.schedule(TimerKey::Hide, 0, 10, ());
        bank.schedule(TimerKey::General, 0, 10, ());
        bank.dispose();
        assert!(bank.is_disposed());
        assert!(bank.is_empty());
        assert!(!bank.schedule(TimerKey::Show, 0, 0, ()));
        assert_eq!(bank.pop_due(u64::MAX), None);
    }

    #[test]
    fn deadline_saturates() {
        let mut bank = TimerBank::new();
        bank.schedule(TimerKey::General, u64::MAX - 1, 10, ());
        assert_eq!(bank.deadline(TimerKey::General), Some(u64::MAX));
    }
}
