// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logging facade.
//!
//! With the `tracing` feature the crate logs through [`tracing`]; without it the
//! same macro names expand to nothing and their arguments are never evaluated.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace, warn};

// The no-op macros get distinct names and are renamed on import: a bare
// `warn` import would be ambiguous with the built-in `#[warn]` attribute.
#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! noop_debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! noop_warn {
        ($($arg:tt)*) => {};
    }

    pub(crate) use noop_debug as debug;
    pub(crate) use noop_trace as trace;
    pub(crate) use noop_warn as warn;
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::{debug, trace, warn};

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;
    use crate::logging;

    // Every macro shape the crate uses must expand in both feature
    // configurations.
    #[test]
    fn macros_accept_field_syntax() {
        let err = ConfigError::NoTriggerModes;
        let key = crate::timer::TimerKey::Show;
        let desired = true;
        logging::warn!(%err, "rejected popup configuration update");
        logging::trace!(?key, deadline = 5_u64, "timer scheduled");
        logging::trace!(desired, "visibility unchanged");
        logging::debug!(open = desired, reason = %err, "popup visibility change");
        logging::debug!("popup torn down");
        let _ = (err, key, desired);
    }
}
