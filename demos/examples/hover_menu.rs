// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hover menu with a mask, driven by a scripted pointer path.
//!
//! The pointer enters the trigger, waits for the menu, slides over the mask
//! and the content, then leaves. The popup's own decisions are logged at
//! `debug` level.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_popup_demos --example hover_menu`

use understory_popup::adapters::Handlers;
use understory_popup::adapters::trigger::TriggerElement;
use understory_popup::chain::Handler;
use understory_popup::event::BasicEvent;
use understory_popup::{Popup, PopupConfig, VisibleChange};

/// One step of the scripted pointer path.
#[derive(Clone, Copy, Debug)]
enum Step {
    EnterTrigger,
    LeaveTrigger,
    EnterMask,
    LeaveMask,
    EnterContent,
    LeaveContent,
}

fn fire(handler: Option<&Handler<BasicEvent>>, now: u64) {
    if let Some(handler) = handler {
        handler(&mut BasicEvent::at(now));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = PopupConfig::default().with_delay_ms(150).with_mask(true);
    let popup: Popup<BasicEvent> = Popup::new(config, None)
        .expect("valid config")
        .with_listener(|change: &VisibleChange<BasicEvent>| {
            tracing::info!(
                open = change.open,
                reason = %change.reason,
                at = change.event.timestamp,
                "menu visibility changed"
            );
        });

    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default().with_describedby("menu-help")))
        .expect("trigger element present");
    let content = popup.decorate_content(&Handlers::new());
    let mask = popup.decorate_mask(&Handlers::new());

    let path = [
        (0, Step::EnterTrigger),
        (400, Step::LeaveTrigger),
        (420, Step::EnterMask),
        (600, Step::LeaveMask),
        (610, Step::EnterContent),
        (900, Step::LeaveContent),
    ];

    for (at, step) in path {
        // Run whatever fell due before this step.
        popup.tick(at);
        tracing::debug!(?step, at, "pointer");
        let handler = match step {
            Step::EnterTrigger => trigger.handlers.on_mouse_enter.as_ref(),
            Step::LeaveTrigger => trigger.handlers.on_mouse_leave.as_ref(),
            Step::EnterMask => mask.on_mouse_enter.as_ref(),
            Step::LeaveMask => mask.on_mouse_leave.as_ref(),
            Step::EnterContent => content.on_mouse_enter.as_ref(),
            Step::LeaveContent => content.on_mouse_leave.as_ref(),
        };
        fire(handler, at);
    }

    while let Some(deadline) = popup.next_deadline() {
        popup.tick(deadline);
    }

    let overlay = popup.overlay_props(Some("trigger"), None, ["menu"]);
    println!("final: open={} overlay={overlay:?}", popup.is_open());
}
