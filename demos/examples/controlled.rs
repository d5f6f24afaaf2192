// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A click popup whose visibility is owned by the host.
//!
//! The host keeps its own `open` flag, applies the popup's requests only when
//! it agrees with them, and feeds the value back with `update`.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_popup_demos --example controlled`

use std::cell::Cell;
use std::rc::Rc;

use understory_popup::adapters::trigger::TriggerElement;
use understory_popup::event::{BasicEvent, keycode};
use understory_popup::{Popup, PopupConfig, Reason, TriggerModes};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = PopupConfig::default().with_modes(TriggerModes::CLICK);
    let host_open = Rc::new(Cell::new(false));
    let requested = Rc::new(Cell::new(None));

    let sink = requested.clone();
    let popup: Popup<BasicEvent> = Popup::new(config.clone(), Some(host_open.get()))
        .expect("valid config")
        .with_listener(move |change| sink.set(Some(change.open)));

    let events = [
        BasicEvent::at(0),
        BasicEvent::key(100, keycode::ENTER),
        BasicEvent::key(200, keycode::ESC),
        BasicEvent::at(300),
    ];

    for (round, event) in events.into_iter().enumerate() {
        let trigger = popup
            .decorate_trigger(Some(&TriggerElement::default()))
            .expect("trigger element present");
        let mut event = event;
        if event.key_code.is_some() {
            if let Some(on_key) = &trigger.handlers.on_key_down {
                on_key(&mut event);
            }
        } else if let Some(on_click) = &trigger.handlers.on_click {
            on_click(&mut event);
        }

        // The host only lets the popup open on even rounds.
        if let Some(want) = requested.take() {
            let allowed = !want || round % 2 == 0;
            tracing::info!(round, want, allowed, "popup asked for a change");
            if allowed {
                host_open.set(want);
            }
        }
        popup
            .update(config.clone(), Some(host_open.get()))
            .expect("valid config");
        println!(
            "round {round}: host={} popup={} expanded={}",
            host_open.get(),
            popup.is_open(),
            trigger.aria_expanded,
        );
    }

    if popup.handle().request_close(Reason::KEYBOARD, BasicEvent::at(400)) {
        if requested.take() == Some(false) {
            host_open.set(false);
        }
        popup.sync_visible(Some(host_open.get()));
    }
    println!("done: open={}", popup.is_open());
}
