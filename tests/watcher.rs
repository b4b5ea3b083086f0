//! Watcher tests - dynamic fields, removal, blur handling

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{focus, focused_input, settings_with_key, test_runtime, test_session, ScriptedGenerator};
use penmate::dom::Dom;
use penmate::messages::{FocusMsg, Msg, MutationMsg};
use penmate::overlay::WidgetKind;
use penmate::update::update;
use penmate::ActionKind;

#[test]
fn test_field_inside_added_subtree_is_picked_up() {
    let mut session = test_session();
    let body = session.dom.body();
    let form = session.dom.append_new(body, "form");
    let row = session.dom.append_new(form, "div");
    let field = session.dom.append_new(row, "textarea");

    update(&mut session, Msg::Mutation(MutationMsg::NodesAdded(vec![form])));

    assert_eq!(session.current_surface().map(|s| s.node), Some(field));
    assert!(session.layer.is_showing(WidgetKind::TriggerButton));
    assert_eq!(session.registry.len(), 1);
}

#[test]
fn test_added_non_editable_nodes_are_ignored() {
    let mut session = test_session();
    let body = session.dom.body();
    let block = session.dom.append_new(body, "div");
    let checkbox = session.dom.append_new(block, "input");
    session.dom.set_attribute(checkbox, "type", "checkbox");

    update(&mut session, Msg::Mutation(MutationMsg::NodesAdded(vec![block])));

    assert_eq!(session.current_surface_id(), None);
    assert!(session.registry.is_empty());
}

#[test]
fn test_overlay_additions_are_not_surfaces() {
    let mut session = test_session();
    focused_input(&mut session, "hello", (0, 0));
    let before = session.current_surface_id();
    update(&mut session, Msg::perform(ActionKind::Generate));
    let prompt_input = session.layer.prompt_input(&session.dom).unwrap();
    let container = session.layer.container().unwrap();

    update(&mut session, Msg::Mutation(MutationMsg::NodesAdded(vec![container])));
    update(&mut session, Msg::focus_in(prompt_input));

    assert_eq!(session.current_surface_id(), before);
    assert_eq!(session.registry.len(), 1);
}

#[test]
fn test_removed_field_takes_trigger_and_menu_with_it() {
    let mut session = test_session();
    let input = focused_input(&mut session, "hello", (0, 0));
    update(&mut session, Msg::Ui(penmate::messages::UiMsg::ShowMenu));
    assert!(session.layer.is_showing(WidgetKind::ActionMenu));

    session.dom.remove(input);
    update(&mut session, Msg::Mutation(MutationMsg::NodesRemoved(vec![input])));

    assert!(!session.layer.is_showing(WidgetKind::TriggerButton));
    assert!(!session.layer.is_showing(WidgetKind::ActionMenu));
    assert_eq!(session.current_surface_id(), None);
    assert!(session.registry.is_empty());
}

#[test]
fn test_removing_other_field_keeps_current() {
    let mut session = test_session();
    let other = session.dom.add_textarea("");
    focus(&mut session, other);
    let input = focused_input(&mut session, "hello", (0, 0));

    session.dom.remove(other);
    update(&mut session, Msg::Mutation(MutationMsg::NodesRemoved(vec![other])));

    assert_eq!(session.current_surface().map(|s| s.node), Some(input));
    assert!(session.layer.is_showing(WidgetKind::TriggerButton));
}

#[test]
fn test_blur_to_page_hides_trigger_after_grace() {
    let generator = Arc::new(ScriptedGenerator::new());
    let mut rt = test_runtime(settings_with_key(), generator);
    let input = focused_input(rt.session_mut(), "hello", (0, 0));

    rt.session_mut().dom.blur_all();
    rt.dispatch(Msg::focus_out(input));
    // Still visible during the grace period
    assert!(rt.session().layer.is_showing(WidgetKind::TriggerButton));

    assert!(rt.pump_until_idle(Duration::from_secs(5)));
    assert!(!rt.session().layer.is_showing(WidgetKind::TriggerButton));
    // The field stays current so the shortcuts keep working
    assert!(rt.session().current_surface_id().is_some());
}

#[test]
fn test_blur_into_overlay_keeps_trigger() {
    let mut session = test_session();
    let input = focused_input(&mut session, "hello", (0, 0));
    let id = session.current_surface_id().unwrap();
    let trigger = session.layer.widget(WidgetKind::TriggerButton).unwrap().node;

    session.dom.focus(trigger);
    update(&mut session, Msg::focus_out(input));
    update(&mut session, Msg::Focus(FocusMsg::BlurGraceElapsed { surface: id }));

    assert!(session.layer.is_showing(WidgetKind::TriggerButton));
}

#[test]
fn test_stale_grace_timer_does_not_hide_new_trigger() {
    let mut session = test_session();
    let first = focused_input(&mut session, "a", (0, 0));
    let first_id = session.current_surface_id().unwrap();
    update(&mut session, Msg::focus_out(first));
    focused_input(&mut session, "b", (0, 0));
    session.dom.blur_all();

    update(
        &mut session,
        Msg::Focus(FocusMsg::BlurGraceElapsed { surface: first_id }),
    );

    assert!(session.layer.is_showing(WidgetKind::TriggerButton));
}
