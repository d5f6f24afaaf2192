// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use core::fmt;

/// A popup configuration that could never open from user interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The trigger mode set is empty.
    NoTriggerModes,
    /// Click mode is active but no key code activates the trigger.
    NoClickKeyCodes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTriggerModes => f.write_str("popup has no trigger modes"),
            Self::NoClickKeyCodes => {
                f.write_str("popup uses click mode but has no activation key codes")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
