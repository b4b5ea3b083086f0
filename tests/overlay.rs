//! Floating UI tests - singletons, container placement, menu interaction

mod common;

use common::{focus, focused_input, generation_request, test_session, toast_text, widget_nodes};
use penmate::dom::Dom;
use penmate::messages::{Msg, MutationMsg, UiMsg};
use penmate::overlay::{WidgetKind, ACTION_ATTR, CONTAINER_ID, SURFACE_REF};
use penmate::update::update;

#[test]
fn test_one_trigger_for_the_latest_surface() {
    let mut session = test_session();
    let first = session.dom.add_input(Some("text"), "");
    let second = session.dom.add_textarea("");

    focus(&mut session, first);
    focus(&mut session, second);

    let triggers = widget_nodes(&session, WidgetKind::TriggerButton);
    assert_eq!(triggers.len(), 1);
    let surface = session.current_surface_id().unwrap();
    assert_eq!(session.layer.trigger_surface(), Some(surface));
    assert_eq!(
        session.dom.attribute(triggers[0], SURFACE_REF),
        Some(surface.to_string())
    );
    assert_eq!(session.current_surface().map(|s| s.node), Some(second));
}

#[test]
fn test_widgets_live_in_a_pass_through_container() {
    let mut session = test_session();
    focused_input(&mut session, "x", (0, 0));

    let container = session.layer.container().unwrap();
    assert_eq!(session.dom.attribute(container, "id").as_deref(), Some(CONTAINER_ID));
    assert_eq!(
        session.dom.style(container, "pointer-events").as_deref(),
        Some("none")
    );
    let trigger = widget_nodes(&session, WidgetKind::TriggerButton)[0];
    assert!(session.dom.is_within(trigger, container));
    assert_eq!(
        session.dom.style(trigger, "pointer-events").as_deref(),
        Some("auto")
    );
}

#[test]
fn test_container_moves_back_to_end_of_body() {
    let mut session = test_session();
    let body = session.dom.body();
    let container = session.layer.container().unwrap();

    session.dom.append_new(body, "div");
    assert_ne!(session.dom.last_child(body), Some(container));
    update(&mut session, Msg::Mutation(MutationMsg::BodyChildrenChanged));
    assert_eq!(session.dom.last_child(body), Some(container));

    session.dom.remove(container);
    update(&mut session, Msg::Mutation(MutationMsg::BodyChildrenChanged));
    assert_eq!(session.dom.parent(container), Some(body));
    assert_eq!(session.dom.last_child(body), Some(container));
}

#[test]
fn test_trigger_click_opens_menu_with_every_action() {
    let mut session = test_session();
    focused_input(&mut session, "x", (0, 0));
    let trigger = widget_nodes(&session, WidgetKind::TriggerButton)[0];

    update(&mut session, Msg::click(trigger));

    let menus = widget_nodes(&session, WidgetKind::ActionMenu);
    assert_eq!(menus.len(), 1);
    let actions: Vec<String> = session
        .dom
        .descendants(menus[0])
        .into_iter()
        .filter_map(|node| session.dom.attribute(node, ACTION_ATTR))
        .collect();
    assert_eq!(actions, vec!["generate", "rewrite", "summarize", "expand"]);
}

#[test]
fn test_menu_item_runs_action_and_closes_menu() {
    let mut session = test_session();
    let input = focused_input(&mut session, "hello world", (0, 5));
    let trigger = widget_nodes(&session, WidgetKind::TriggerButton)[0];
    update(&mut session, Msg::click(trigger));
    // Clicking the menu moves focus away from the field
    session.dom.blur_all();

    let item = session.dom.query_by_attribute(ACTION_ATTR, "rewrite").unwrap();
    let cmd = update(&mut session, Msg::click(item));

    let (_, payload) = generation_request(cmd).unwrap();
    assert_eq!(payload.prompt, "Rewrite the following text: hello");
    assert!(!session.layer.is_showing(WidgetKind::ActionMenu));
    assert!(session.layer.is_showing(WidgetKind::LoadingIndicator));
    assert_eq!(session.snapshot.captured().map(|s| s.text.as_str()), Some("hello world"));
    assert_eq!(session.dom.value(input).as_deref(), Some("hello world"));
}

#[test]
fn test_outside_click_closes_menu() {
    let mut session = test_session();
    focused_input(&mut session, "x", (0, 0));
    let trigger = widget_nodes(&session, WidgetKind::TriggerButton)[0];
    update(&mut session, Msg::click(trigger));
    let body = session.dom.body();
    let elsewhere = session.dom.append_new(body, "p");

    update(&mut session, Msg::click(elsewhere));

    assert!(!session.layer.is_showing(WidgetKind::ActionMenu));
    assert!(session.layer.is_showing(WidgetKind::TriggerButton));
}

#[test]
fn test_toast_is_a_singleton() {
    let mut session = test_session();
    session.toast("first");
    session.toast("second");

    assert_eq!(widget_nodes(&session, WidgetKind::Toast).len(), 1);
    assert_eq!(toast_text(&session).as_deref(), Some("second"));
}

#[test]
fn test_expired_toast_is_removed() {
    let mut session = test_session();
    session.toast("done");
    let node = session.layer.widget(WidgetKind::Toast).unwrap().node;

    update(&mut session, Msg::Ui(UiMsg::ToastExpired { node }));

    assert!(widget_nodes(&session, WidgetKind::Toast).is_empty());
    assert!(!session.dom.contains(node));
}

#[test]
fn test_prompt_cancel_closes_dialog() {
    let mut session = test_session();
    let input = focused_input(&mut session, "x", (0, 0));
    update(&mut session, Msg::perform(penmate::ActionKind::Generate));
    assert!(session.layer.is_showing(WidgetKind::PromptDialog));

    update(&mut session, Msg::Ui(UiMsg::CancelPrompt));

    assert!(!session.layer.is_showing(WidgetKind::PromptDialog));
    assert_eq!(session.dom.value(input).as_deref(), Some("x"));
}
