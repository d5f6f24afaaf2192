// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end interaction scenarios driven through decorated handlers.

use std::cell::RefCell;
use std::rc::Rc;

use understory_popup::adapters::Handlers;
use understory_popup::adapters::trigger::TriggerElement;
use understory_popup::chain::{Handler, handler};
use understory_popup::event::BasicEvent;
use understory_popup::{Popup, PopupConfig, Reason, TriggerModes, VisibleChange};

type Log = Rc<RefCell<Vec<VisibleChange<BasicEvent>>>>;

fn logged(config: PopupConfig) -> (Popup<BasicEvent>, Log) {
    let log: Log = Rc::default();
    let sink = log.clone();
    let popup = Popup::new(config, None)
        .unwrap()
        .with_listener(move |change| sink.borrow_mut().push(change.clone()));
    (popup, log)
}

fn fire(h: &Option<Handler<BasicEvent>>, event: &mut BasicEvent) {
    (h.as_ref().expect("handler installed"))(event);
}

#[test]
fn hover_leave_before_delay_never_opens() {
    let (popup, log) = logged(PopupConfig::default().with_delay_ms(200));
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();

    fire(&trigger.handlers.on_mouse_enter, &mut BasicEvent::at(0));
    assert!(log.borrow().is_empty());
    fire(&trigger.handlers.on_mouse_leave, &mut BasicEvent::at(199));

    for now in [199, 200, 400, 10_000] {
        popup.tick(now);
    }
    assert!(log.borrow().is_empty());
    assert!(!popup.is_open());
}

#[test]
fn click_opens_and_closes_immediately() {
    let (popup, log) = logged(PopupConfig::default().with_modes(TriggerModes::CLICK));
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();

    let first = BasicEvent::at(5);
    fire(&trigger.handlers.on_click, &mut first.clone());
    assert_eq!(
        log.borrow().last(),
        Some(&VisibleChange {
            open: true,
            reason: Reason::FromTrigger,
            event: first,
        })
    );

    fire(&trigger.handlers.on_click, &mut BasicEvent::at(6));
    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert!(!log[1].open);
    assert_eq!(log[1].reason, Reason::FromTrigger);
}

#[test]
fn content_press_swallows_one_trigger_blur() {
    let (popup, log) = logged(PopupConfig::default().with_modes(TriggerModes::FOCUS));
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();
    let content = popup.decorate_content(&Handlers::new());

    fire(&trigger.handlers.on_focus, &mut BasicEvent::at(0));
    assert_eq!(log.borrow().len(), 1);

    fire(&content.on_mouse_down, &mut BasicEvent::at(10));
    fire(&trigger.handlers.on_blur, &mut BasicEvent::at(11));
    assert_eq!(log.borrow().len(), 1);
    assert!(popup.is_open());

    // The flag only covers one blur.
    fire(&trigger.handlers.on_focus, &mut BasicEvent::at(20));
    fire(&trigger.handlers.on_blur, &mut BasicEvent::at(21));
    assert_eq!(log.borrow().len(), 2);
    assert!(!popup.is_open());
}

#[test]
fn hover_into_content_and_out() {
    let (popup, log) = logged(PopupConfig::default());
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();
    let content = popup.decorate_content(&Handlers::new());

    fire(&trigger.handlers.on_mouse_enter, &mut BasicEvent::at(0));
    popup.tick(200);
    assert!(popup.is_open());

    fire(&trigger.handlers.on_mouse_leave, &mut BasicEvent::at(300));
    fire(&content.on_mouse_enter, &mut BasicEvent::at(320));
    popup.tick(1_000);
    assert!(popup.is_open());

    fire(&content.on_mouse_leave, &mut BasicEvent::at(1_100));
    popup.tick(1_300);
    assert!(!popup.is_open());
    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].reason, Reason::FromContent);
    assert_eq!(log[1].event, BasicEvent::at(1_100));
}

// Two popups decorating the same trigger each keep their own state, and the
// caller's own handler keeps running.
#[test]
fn popups_sharing_a_trigger_are_independent() {
    let caller_clicks = Rc::new(RefCell::new(0));
    let counter = caller_clicks.clone();
    let mut handlers = Handlers::new();
    handlers.on_click = Some(handler(move |_: &mut BasicEvent| *counter.borrow_mut() += 1));
    let element = TriggerElement::new(handlers).with_describedby("help");

    let (menu, menu_log) = logged(PopupConfig::default().with_modes(TriggerModes::CLICK));
    let (tip, tip_log) = logged(
        PopupConfig::default()
            .with_modes(TriggerModes::CLICK)
            .with_can_close_by_trigger(false),
    );

    let once = menu.decorate_trigger(Some(&element)).unwrap().into_element();
    let twice = tip.decorate_trigger(Some(&once)).unwrap();
    assert_eq!(twice.aria_describedby, None);

    fire(&twice.handlers.on_click, &mut BasicEvent::at(0));
    fire(&twice.handlers.on_click, &mut BasicEvent::at(1));

    assert_eq!(*caller_clicks.borrow(), 2);
    assert_eq!(menu_log.borrow().len(), 2);
    assert!(!menu.is_open());
    assert_eq!(tip_log.borrow().len(), 1);
    assert!(tip.is_open());

    // The closed menu hides the description, but still hands the element's
    // own one on to the open tip.
    let once = menu.decorate_trigger(Some(&element)).unwrap();
    assert_eq!(once.aria_describedby, None);
    let twice = tip.decorate_trigger(Some(&once.into_element())).unwrap();
    assert!(twice.aria_expanded);
    assert_eq!(twice.aria_describedby.as_deref(), Some("help"));
}

#[test]
fn floating_layer_closes_through_handle() {
    let (popup, log) = logged(PopupConfig::default().with_modes(TriggerModes::CLICK));
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();
    fire(&trigger.handlers.on_click, &mut BasicEvent::at(0));

    let handle = popup.handle();
    assert!(handle.request_close(Reason::DOC_CLICK, BasicEvent::at(50)));
    assert_eq!(handle.is_open(), Some(false));
    assert_eq!(log.borrow()[1].reason.as_str(), "docClick");
}

#[test]
fn controlled_popup_reports_and_follows_host() {
    let log: Log = Rc::default();
    let sink = log.clone();
    let popup = Popup::new(PopupConfig::default().with_modes(TriggerModes::CLICK), Some(false))
        .unwrap()
        .with_listener(move |change| sink.borrow_mut().push(change.clone()));
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();

    fire(&trigger.handlers.on_click, &mut BasicEvent::at(0));
    assert_eq!(log.borrow().len(), 1);
    assert!(log.borrow()[0].open);
    // Not applied until the host says so.
    assert!(!popup.is_open());

    popup
        .update(PopupConfig::default().with_modes(TriggerModes::CLICK), Some(true))
        .unwrap();
    assert!(popup.is_open());
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();
    assert!(trigger.aria_expanded);
}

#[test]
fn releasing_control_keeps_the_host_value() {
    let config = PopupConfig::default().with_modes(TriggerModes::CLICK);
    let log: Log = Rc::default();
    let sink = log.clone();
    let popup = Popup::new(config.clone(), Some(false))
        .unwrap()
        .with_listener(move |change| sink.borrow_mut().push(change.clone()));
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();

    // Requested, but the host keeps it closed.
    fire(&trigger.handlers.on_click, &mut BasicEvent::at(0));
    assert_eq!(log.borrow().len(), 1);

    popup.update(config, None).unwrap();
    assert!(!popup.is_open());
    assert_eq!(log.borrow().len(), 1);

    // Now uncontrolled, the next click opens it itself.
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();
    fire(&trigger.handlers.on_click, &mut BasicEvent::at(10));
    assert!(popup.is_open());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn disabled_hover_popup_closes_when_content_is_left() {
    let (popup, log) = logged(
        PopupConfig::default()
            .with_disabled(true)
            .with_default_visible(true),
    );
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();
    assert!(trigger.handlers.is_empty());
    let content = popup.decorate_content(&Handlers::new());

    fire(&content.on_mouse_leave, &mut BasicEvent::at(0));
    popup.tick(10_000);
    assert!(!popup.is_open());
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].reason, Reason::FromContent);
}

#[test]
fn rejected_update_does_not_disturb_the_popup() {
    let (popup, _) = logged(PopupConfig::default());
    let err = popup
        .update(PopupConfig::default().with_modes(TriggerModes::empty()), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "popup has no trigger modes");
    let trigger = popup
        .decorate_trigger(Some(&TriggerElement::default()))
        .unwrap();
    assert!(trigger.handlers.on_mouse_enter.is_some());
}
