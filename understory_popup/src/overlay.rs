// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the popup hands its floating-layer collaborator.
//!
//! Positioning, mounting and outside-click detection belong to the floating
//! layer. The popup only tells it whether to show, what to anchor to, where to
//! mount, and which nodes count as "inside" for outside-click detection. The
//! floating layer reports outside interactions back through
//! [`PopupHandle::request_close`](crate::popup::PopupHandle::request_close).
//!
//! Nodes are whatever handle the host uses for elements (`N`).

use alloc::vec::Vec;

use crate::config::PopupConfig;

/// Where the floating layer mounts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Container {
    /// The host's default container.
    #[default]
    Default,
    /// The trigger's parent, so the layer scrolls with the trigger.
    TriggerParent,
}

/// Props for the floating layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayProps<N> {
    /// Whether the layer is shown.
    pub visible: bool,
    /// Positioning anchor: the explicit target, else the trigger.
    pub target: Option<N>,
    /// Mount point.
    pub container: Container,
    /// Whether the layer wrapper must be relatively positioned.
    pub wrapper_relative: bool,
    /// Nodes exempt from outside-click detection, trigger first.
    pub safe_nodes: Vec<N>,
    /// Whether to render a mask.
    pub has_mask: bool,
    /// Whether the mask should be decorated with
    /// [`Popup::decorate_mask`](crate::popup::Popup::decorate_mask).
    pub tracks_mask: bool,
}

impl<N: Clone> OverlayProps<N> {
    pub(crate) fn build(
        config: &PopupConfig,
        visible: bool,
        trigger: Option<N>,
        target: Option<N>,
        extra_safe_nodes: impl IntoIterator<Item = N>,
    ) -> Self {
        let mut safe_nodes: Vec<N> = trigger.iter().cloned().collect();
        safe_nodes.extend(extra_safe_nodes);
        let container = if config.follow_trigger {
            Container::TriggerParent
        } else {
            Container::Default
        };
        Self {
            visible,
            target: target.or(trigger),
            container,
            wrapper_relative: config.follow_trigger,
            safe_nodes,
            has_mask: config.has_mask,
            tracks_mask: config.tracks_mask(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn trigger_is_first_safe_node_and_default_target() {
        let props = OverlayProps::build(&PopupConfig::default(), true, Some(1), None, [7, 8]);
        assert_eq!(props.safe_nodes, vec![1, 7, 8]);
        assert_eq!(props.target, Some(1));
        assert_eq!(props.container, Container::Default);
        assert!(!props.wrapper_relative);
        assert!(props.visible);
    }

    #[test]
    fn explicit_target_wins() {
        let props = OverlayProps::build(&PopupConfig::default(), false, Some(1), Some(5), []);
        assert_eq!(props.target, Some(5));
        assert_eq!(props.safe_nodes, vec![1]);
    }

    #[test]
    fn follow_trigger_mounts_in_parent() {
        let config = PopupConfig::default().with_follow_trigger(true).with_mask(true);
        let props = OverlayProps::build(&config, false, None::<u32>, None, []);
        assert_eq!(props.container, Container::TriggerParent);
        assert!(props.wrapper_relative);
        assert!(props.has_mask);
        assert!(props.tracks_mask);
        assert!(props.safe_nodes.is_empty());
        assert_eq!(props.target, None);
    }
}
