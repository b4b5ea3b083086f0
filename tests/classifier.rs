//! Element classifier tests - which nodes the assist attaches to

mod common;

use common::{focus, test_session};
use penmate::classify::{is_editable_surface, SurfaceKind};
use penmate::dom::{Dom, MemoryDom};
use penmate::overlay::WidgetKind;

#[test]
fn test_every_input_type() {
    let mut dom = MemoryDom::new();
    let cases = [
        (None, true),
        (Some(""), true),
        (Some("text"), true),
        (Some("search"), true),
        (Some("url"), true),
        (Some("tel"), true),
        (Some("email"), true),
        (Some("password"), true),
        (Some("checkbox"), false),
        (Some("radio"), false),
        (Some("file"), false),
        (Some("number"), false),
        (Some("hidden"), false),
        (Some("submit"), false),
        (Some("TEXT"), true),
        (Some("Email"), true),
        (Some("Checkbox"), false),
        (Some("not-a-type"), true),
    ];

    for (input_type, expected) in cases {
        let input = dom.add_input(input_type, "");
        assert_eq!(
            is_editable_surface(&dom, input),
            expected,
            "input type {:?}",
            input_type
        );
    }
}

#[test]
fn test_textarea_and_plain_elements() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let area = dom.add_textarea("");
    let div = dom.append_new(body, "div");
    let span = dom.append_new(body, "span");
    let button = dom.append_new(body, "button");

    assert_eq!(SurfaceKind::of(&dom, area), Some(SurfaceKind::TextArea));
    assert!(!is_editable_surface(&dom, div));
    assert!(!is_editable_surface(&dom, span));
    assert!(!is_editable_surface(&dom, button));
}

#[test]
fn test_contenteditable_values() {
    let mut dom = MemoryDom::new();
    let body = dom.body();

    for (value, expected) in [
        ("true", true),
        ("false", false),
        ("", false),
        ("plaintext-only", false),
        ("TRUE", false),
    ] {
        let node = dom.append_new(body, "p");
        dom.set_attribute(node, "contenteditable", value);
        assert_eq!(
            is_editable_surface(&dom, node),
            expected,
            "contenteditable={:?}",
            value
        );
    }
}

#[test]
fn test_classification_does_not_mutate() {
    let mut dom = MemoryDom::new();
    let input = dom.add_input(None, "x");
    is_editable_surface(&dom, input);

    assert_eq!(dom.attribute(input, "data-penmate-id"), None);
    assert!(dom.events_for(input).is_empty());
}

#[test]
fn test_focus_on_non_text_input_shows_nothing() {
    let mut session = test_session();
    let radio = session.dom.add_input(Some("radio"), "");

    focus(&mut session, radio);

    assert_eq!(session.current_surface_id(), None);
    assert!(!session.layer.is_showing(WidgetKind::TriggerButton));
}
