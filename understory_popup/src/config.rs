// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup configuration: trigger modes, delays, and close policies.
//!
//! The host passes a [`PopupConfig`] when creating a popup and again on every
//! update. Validation happens at both points; see [`PopupConfig::validate`].
//!
//! ```
//! use understory_popup::config::{PopupConfig, TriggerModes};
//! use understory_popup::event::keycode;
//!
//! let config = PopupConfig::default()
//!     .with_modes(TriggerModes::CLICK | TriggerModes::FOCUS)
//!     .with_click_key_code(keycode::ENTER)
//!     .with_can_close_by_trigger(false);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.click_key_codes.as_slice(), &[keycode::ENTER]);
//! ```

use smallvec::{SmallVec, smallvec};

use crate::error::ConfigError;
use crate::event::{KeyCode, keycode};

bitflags::bitflags! {
    /// Interactions on the trigger that open and close the popup.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TriggerModes: u8 {
        /// Click (and activation keys) toggles the popup.
        const CLICK = 0b0000_0001;
        /// Pointer enter/leave opens and closes after a delay.
        const HOVER = 0b0000_0010;
        /// Focus opens, blur closes.
        const FOCUS = 0b0000_0100;
    }
}

impl Default for TriggerModes {
    fn default() -> Self {
        Self::HOVER
    }
}

/// Whether leaving the trigger in hover mode honors
/// [`PopupConfig::can_close_by_trigger`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoverClosePolicy {
    /// Hover leave always schedules a close.
    #[default]
    Always,
    /// Hover leave is ignored while `can_close_by_trigger` is `false`.
    RespectCanCloseByTrigger,
}

/// What re-arms first-landing suppression on the mask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskLanding {
    /// Leaving the mask re-arms it, so every enter after a leave pins the popup.
    #[default]
    Rearm,
    /// Only entering the trigger re-arms it; one pin per trigger visit.
    OncePerTriggerEntry,
}

/// Popup configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopupConfig {
    /// Interactions that open and close the popup.
    pub modes: TriggerModes,
    /// Keys that act as a click on the trigger in click mode.
    pub click_key_codes: SmallVec<[KeyCode; 2]>,
    /// Show and hide delay in hover mode, in milliseconds.
    pub delay_ms: u64,
    /// Whether clicking the trigger may close an open popup.
    pub can_close_by_trigger: bool,
    /// See [`HoverClosePolicy`].
    pub hover_close: HoverClosePolicy,
    /// See [`MaskLanding`].
    pub mask_landing: MaskLanding,
    /// In controlled mode, notify even when the request matches the host value.
    pub reannounce_controlled: bool,
    /// Initial visibility in uncontrolled mode.
    pub default_visible: bool,
    /// Disable trigger interaction entirely.
    pub disabled: bool,
    /// Whether the floating layer renders a mask.
    pub has_mask: bool,
    /// Mount the floating layer in the trigger's parent.
    pub follow_trigger: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            modes: TriggerModes::HOVER,
            click_key_codes: smallvec![keycode::SPACE, keycode::ENTER],
            delay_ms: 200,
            can_close_by_trigger: true,
            hover_close: HoverClosePolicy::Always,
            mask_landing: MaskLanding::Rearm,
            reannounce_controlled: false,
            default_visible: false,
            disabled: false,
            has_mask: false,
            follow_trigger: false,
        }
    }
}

impl PopupConfig {
    /// Reject configurations under which the popup can never be opened by
    /// interaction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modes.is_empty() {
            return Err(ConfigError::NoTriggerModes);
        }
        if self.modes.contains(TriggerModes::CLICK) && self.click_key_codes.is_empty() {
            return Err(ConfigError::NoClickKeyCodes);
        }
        Ok(())
    }

    /// Whether `key` activates the trigger in click mode.
    pub fn is_click_key(&self, key: KeyCode) -> bool {
        self.click_key_codes.contains(&key)
    }

    /// Whether mask enter/leave tracking applies.
    ///
    /// Only pure hover popups with a mask track mask landings.
    pub fn tracks_mask(&self) -> bool {
        self.has_mask && self.modes == TriggerModes::HOVER
    }

    /// Set the trigger modes.
    pub fn with_modes(mut self, modes: TriggerModes) -> Self {
        self.modes = modes;
        self
    }

    /// Use a single activation key.
    pub fn with_click_key_code(mut self, key: KeyCode) -> Self {
        self.click_key_codes = smallvec![key];
        self
    }

    /// Use a list of activation keys.
    pub fn with_click_key_codes(mut self, keys: impl IntoIterator<Item = KeyCode>) -> Self {
        self.click_key_codes = keys.into_iter().collect();
        self
    }

    /// Set the hover delay.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Allow or forbid closing by trigger click.
    pub fn with_can_close_by_trigger(mut self, can_close: bool) -> Self {
        self.can_close_by_trigger = can_close;
        self
    }

    /// Set the hover close policy.
    pub fn with_hover_close(mut self, policy: HoverClosePolicy) -> Self {
        self.hover_close = policy;
        self
    }

    /// Set the mask landing policy.
    pub fn with_mask_landing(mut self, landing: MaskLanding) -> Self {
        self.mask_landing = landing;
        self
    }

    /// Set the initial uncontrolled visibility.
    pub fn with_default_visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }

    /// Disable or enable trigger interaction.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Render a mask behind the floating layer.
    pub fn with_mask(mut self, has_mask: bool) -> Self {
        self.has_mask = has_mask;
        self
    }

    /// Mount the floating layer next to the trigger.
    pub fn with_follow_trigger(mut self, follow: bool) -> Self {
        self.follow_trigger = follow;
        self
    }

    /// Re-announce matching requests in controlled mode.
    pub fn with_reannounce_controlled(mut self, reannounce: bool) -> Self {
        self.reannounce_controlled = reannounce;
        self
    }
}
