//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use penmate::config::AssistConfig;
use penmate::dom::{Dom, MemoryDom, NodeId};
use penmate::error::GenerationError;
use penmate::generation::{GenerationPayload, TextGenerator};
use penmate::keymap::{parse_key_string, Keystroke};
use penmate::messages::Msg;
use penmate::overlay::WidgetKind;
use penmate::runtime::Runtime;
use penmate::settings::Settings;
use penmate::update::update;
use penmate::{Cmd, Session};

/// Timings short enough for tests that wait on real timers
pub fn fast_config() -> AssistConfig {
    AssistConfig {
        toast_ms: 20,
        blur_grace_ms: 10,
        pointer_fallback_ms: 10,
        ..AssistConfig::default()
    }
}

pub fn settings_with_key() -> Settings {
    Settings {
        api_key: Some("sk-test".to_string()),
        ..Settings::default()
    }
}

/// Attached session with an API key configured
pub fn test_session() -> Session<MemoryDom> {
    let mut session = Session::new(MemoryDom::new(), settings_with_key(), fast_config());
    session.attach();
    session
}

/// Attached session with no API key
pub fn session_without_key() -> Session<MemoryDom> {
    let mut session = Session::new(MemoryDom::new(), Settings::default(), fast_config());
    session.attach();
    session
}

/// Focus `node` the way a browser host reports it
pub fn focus<D: Dom>(session: &mut Session<D>, node: NodeId) {
    session.dom.focus(node);
    update(session, Msg::focus_in(node));
}

/// Add a focused text input with the given value and selection
pub fn focused_input(
    session: &mut Session<MemoryDom>,
    value: &str,
    selection: (usize, usize),
) -> NodeId {
    let input = session.dom.add_input(Some("text"), value);
    session.dom.set_selection_range(input, selection.0, selection.1);
    focus(session, input);
    input
}

/// Add a focused contenteditable region with the given text and selection
pub fn focused_contenteditable(
    session: &mut Session<MemoryDom>,
    text: &str,
    selection: Option<(usize, usize)>,
) -> NodeId {
    let div = session.dom.add_contenteditable(text);
    if let Some((start, end)) = selection {
        session.dom.set_text_selection(div, start, end);
    }
    focus(session, div);
    div
}

pub fn key(chord: &str) -> Keystroke {
    parse_key_string(chord).unwrap()
}

/// The generation request inside a command, if any
pub fn generation_request(cmd: Option<Cmd>) -> Option<(penmate::generation::RequestId, GenerationPayload)> {
    match cmd? {
        Cmd::Generate { request, payload } => Some((request, payload)),
        _ => None,
    }
}

/// Text of the toast currently showing
pub fn toast_text<D: Dom>(session: &Session<D>) -> Option<String> {
    let node = session.layer.widget(WidgetKind::Toast)?.node;
    Some(session.dom.inner_text(node))
}

/// Nodes in the overlay carrying a widget's class
pub fn widget_nodes(session: &Session<MemoryDom>, kind: WidgetKind) -> Vec<NodeId> {
    session.dom.nodes_with_class(kind.class())
}

// ============================================================================
// Scripted generator
// ============================================================================

/// Generator that answers from a queue and records every call
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(responses: &[&str]) -> Self {
        let generator = Self::new();
        for response in responses {
            generator.push(Ok(response.to_string()));
        }
        generator
    }

    pub fn push(&self, response: Result<String, GenerationError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(payload.prompt.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::transport("no scripted response")))
    }
}

/// Runtime over a fresh attached session
pub fn test_runtime(
    settings: Settings,
    generator: Arc<ScriptedGenerator>,
) -> Runtime<MemoryDom, ScriptedGenerator> {
    let mut session = Session::new(MemoryDom::new(), settings, fast_config());
    session.attach();
    Runtime::new(session, generator)
}
