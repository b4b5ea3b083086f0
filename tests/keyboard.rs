//! Keyboard routing tests - shortcuts, conditions, default suppression

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    focused_input, generation_request, key, session_without_key, settings_with_key,
    test_runtime, test_session, toast_text, ScriptedGenerator,
};
use penmate::dom::Dom;
use penmate::keymap::keystroke_from_dom;
use penmate::overlay::WidgetKind;
use penmate::update::handle_keystroke;

#[test]
fn test_action_shortcuts_in_ctrl_and_cmd_form() {
    for chord in ["ctrl+shift+r", "meta+shift+r"] {
        let mut session = test_session();
        focused_input(&mut session, "hello", (0, 5));

        let outcome = handle_keystroke(&mut session, key(chord));

        assert!(outcome.prevent_default, "{} was not suppressed", chord);
        let (_, payload) = generation_request(outcome.cmd).unwrap();
        assert_eq!(payload.prompt, "Rewrite the following text: hello");
    }
}

#[test]
fn test_summarize_and_expand_shortcuts() {
    let mut session = test_session();
    focused_input(&mut session, "hello", (0, 5));

    let summarize = handle_keystroke(&mut session, key("ctrl+shift+z"));
    assert_eq!(
        generation_request(summarize.cmd).unwrap().1.prompt,
        "Summarize the following text: hello"
    );

    let expand = handle_keystroke(&mut session, key("meta+shift+e"));
    assert_eq!(
        generation_request(expand.cmd).unwrap().1.prompt,
        "Expand on the following text with more details: hello"
    );
}

#[test]
fn test_shortcuts_pass_through_without_a_field() {
    let mut session = test_session();
    for chord in ["ctrl+shift+g", "ctrl+shift+r", "alt+a", "escape", "ctrl+enter"] {
        let outcome = handle_keystroke(&mut session, key(chord));
        assert!(!outcome.prevent_default, "{} was suppressed", chord);
        assert!(outcome.cmd.is_none());
    }
    assert!(toast_text(&session).is_none());
}

#[test]
fn test_generate_shortcut_opens_prompt() {
    let mut session = test_session();
    focused_input(&mut session, "", (0, 0));

    let outcome = handle_keystroke(&mut session, key("ctrl+shift+g"));

    assert!(outcome.prevent_default);
    assert!(session.layer.is_showing(WidgetKind::PromptDialog));
}

#[test]
fn test_shortcut_without_credential_still_suppresses_and_explains() {
    let mut session = session_without_key();
    focused_input(&mut session, "hello", (0, 5));

    let outcome = handle_keystroke(&mut session, key("ctrl+shift+r"));

    assert!(outcome.prevent_default);
    assert_eq!(
        toast_text(&session).as_deref(),
        Some("Please set your OpenAI API key in the extension settings")
    );
}

#[test]
fn test_alt_a_opens_menu_when_trigger_visible() {
    let mut session = test_session();
    focused_input(&mut session, "hello", (0, 0));

    let outcome = handle_keystroke(&mut session, key("alt+a"));

    assert!(outcome.prevent_default);
    assert!(session.layer.is_showing(WidgetKind::ActionMenu));
}

#[test]
fn test_escape_closes_prompt_then_menu() {
    let mut session = test_session();
    focused_input(&mut session, "hello", (0, 0));
    handle_keystroke(&mut session, key("alt+a"));
    handle_keystroke(&mut session, key("ctrl+shift+g"));
    // Running an action closes the menu; reopen it behind the dialog
    handle_keystroke(&mut session, key("alt+a"));
    assert!(session.layer.is_showing(WidgetKind::PromptDialog));
    assert!(session.layer.is_showing(WidgetKind::ActionMenu));

    assert!(handle_keystroke(&mut session, key("escape")).prevent_default);
    assert!(!session.layer.is_showing(WidgetKind::PromptDialog));
    assert!(session.layer.is_showing(WidgetKind::ActionMenu));

    assert!(handle_keystroke(&mut session, key("escape")).prevent_default);
    assert!(!session.layer.is_showing(WidgetKind::ActionMenu));

    assert!(!handle_keystroke(&mut session, key("escape")).prevent_default);
}

#[test]
fn test_ctrl_enter_submits_prompt() {
    let generator = Arc::new(ScriptedGenerator::answering(&["Hello there"]));
    let mut rt = test_runtime(settings_with_key(), generator.clone());
    let input = focused_input(rt.session_mut(), "", (0, 0));

    assert!(rt.key(key("ctrl+shift+g")));
    let session = rt.session_mut();
    let prompt = session.layer.prompt_input(&session.dom).unwrap();
    assert_eq!(session.dom.active_element(), Some(prompt));
    session.dom.set_value(prompt, "greet");

    assert!(rt.key(key("ctrl+enter")));
    assert!(rt.pump_until_idle(Duration::from_secs(5)));

    assert_eq!(generator.prompts(), vec!["greet"]);
    assert_eq!(rt.session().dom.value(input).as_deref(), Some("Hello there"));
}

#[test]
fn test_blank_prompt_submit_keeps_dialog_open() {
    let mut session = test_session();
    focused_input(&mut session, "", (0, 0));
    handle_keystroke(&mut session, key("ctrl+shift+g"));

    let outcome = handle_keystroke(&mut session, key("ctrl+enter"));

    assert!(outcome.prevent_default);
    assert!(session.layer.is_showing(WidgetKind::PromptDialog));
    assert_eq!(toast_text(&session).as_deref(), Some("Please enter a prompt"));
}

#[test]
fn test_browser_events_route_like_parsed_chords() {
    let mut session = test_session();
    focused_input(&mut session, "hello", (0, 0));

    // Option+A on macOS reports "å" as the key
    let stroke = keystroke_from_dom("å", "KeyA", false, false, true, false).unwrap();
    assert_eq!(stroke, key("alt+a"));
    assert!(handle_keystroke(&mut session, stroke).prevent_default);

    let stroke = keystroke_from_dom("Escape", "Escape", false, false, false, false).unwrap();
    assert!(handle_keystroke(&mut session, stroke).prevent_default);
    assert!(!session.layer.is_showing(WidgetKind::ActionMenu));
}
