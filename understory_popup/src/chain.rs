// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event handler composition.
//!
//! Trigger and content elements belong to the caller and may already carry
//! handlers. Decoration never replaces them: [`chain`] builds a new handler that
//! runs the popup's handler first and the pre-existing one second.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_popup::chain::{chain, handler};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (a, b) = (log.clone(), log.clone());
//! let existing = handler(move |e: &mut u32| b.borrow_mut().push(("existing", *e)));
//! let combined = chain(handler(move |e: &mut u32| a.borrow_mut().push(("popup", *e))), Some(existing));
//!
//! combined(&mut 7);
//! assert_eq!(*log.borrow(), vec![("popup", 7), ("existing", 7)]);
//! ```
//!
//! Handlers take a single `&mut E`. Events that carry several values are passed
//! as one struct or tuple, so every value reaches both handlers.

use alloc::rc::Rc;

/// A shareable event handler.
///
/// Handlers are reference counted so a handler set can be cloned into every
/// render without rebuilding the closures.
pub type Handler<E> = Rc<dyn Fn(&mut E)>;

/// Wrap a closure as a [`Handler`].
pub fn handler<E>(f: impl Fn(&mut E) + 'static) -> Handler<E> {
    Rc::new(f)
}

/// Compose `primary` with an optional pre-existing handler.
///
/// The returned handler calls `primary` and then `existing` with the same event.
/// Without `existing` the result is `primary` itself. A panic in either handler
/// propagates unchanged.
pub fn chain<E: 'static>(primary: Handler<E>, existing: Option<Handler<E>>) -> Handler<E> {
    match existing {
        None => primary,
        Some(existing) => Rc::new(move |event: &mut E| {
            primary(event);
            existing(event);
        }),
    }
}

/// Chain onto an optional slot in place.
///
/// Convenience for adapters: `slot` ends up holding `chain(primary, slot.take())`.
pub fn chain_into<E: 'static>(slot: &mut Option<Handler<E>>, primary: Handler<E>) {
    *slot = Some(chain(primary, slot.take()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Handler<u32> {
        let log = log.clone();
        handler(move |_| log.borrow_mut().push(name))
    }

    #[test]
    fn primary_runs_before_existing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let combined = chain(recorder(&log, "primary"), Some(recorder(&log, "existing")));
        combined(&mut 0);
        assert_eq!(*log.borrow(), vec!["primary", "existing"]);
    }

    #[test]
    fn missing_existing_returns_primary() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let primary = recorder(&log, "primary");
        let combined = chain(primary.clone(), None);
        assert!(Rc::ptr_eq(&primary, &combined));
        combined(&mut 0);
        assert_eq!(*log.borrow(), vec!["primary"]);
    }

    #[test]
    fn both_handlers_see_mutations() {
        let bump = handler(|e: &mut u32| *e += 1);
        let seen = Rc::new(RefCell::new(0));
        let s = seen.clone();
        let combined = chain(bump, Some(handler(move |e: &mut u32| *s.borrow_mut() = *e)));
        let mut event = 41;
        combined(&mut event);
        assert_eq!(event, 42);
        assert_eq!(*seen.borrow(), 42);
    }

    // N decorations of one slot: the newest decoration runs first, the
    // caller's own handler last.
    #[test]
    fn repeated_chaining_stacks_without_clobbering() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = Some(recorder(&log, "caller"));
        chain_into(&mut slot, recorder(&log, "first popup"));
        chain_into(&mut slot, recorder(&log, "second popup"));
        (slot.unwrap())(&mut 0);
        assert_eq!(*log.borrow(), vec!["second popup", "first popup", "caller"]);
    }

    #[test]
    #[should_panic(expected = "existing failed")]
    fn panic_in_existing_propagates_after_primary() {
        let ran = Rc::new(RefCell::new(false));
        let r = ran.clone();
        let primary = handler(move |_: &mut u32| *r.borrow_mut() = true);
        let existing = handler(|_: &mut u32| panic!("existing failed"));
        let combined = chain(primary, Some(existing));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| combined(&mut 0)));
        assert!(*ran.borrow(), "primary should run before the panicking handler");
        std::panic::resume_unwind(result.unwrap_err());
    }
}
