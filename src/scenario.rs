//! Scripted page replays
//!
//! A scenario describes a small page (a handful of fields) and a sequence of
//! user steps. Replaying it drives a [`Runtime`] over a [`MemoryDom`] exactly
//! as a browser host would, which makes assist flows reproducible from the
//! command line.
//!
//! ```yaml
//! api_key: sk-test
//! elements:
//!   - name: body
//!     kind: textarea
//!     text: "The quick brown fox"
//! steps:
//!   - focus: body
//!   - select: { element: body, start: 4, end: 9 }
//!   - key: ctrl+shift+r
//!   - wait
//!   - expect: { element: body, text: "The Rewrite the following text: quick brown fox" }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::action::ActionKind;
use crate::classify::SurfaceKind;
use crate::config::AssistConfig;
use crate::dom::{Dom, MemoryDom, NodeId};
use crate::editable::get_full_text;
use crate::generation::TextGenerator;
use crate::keymap::parse_key_string;
use crate::messages::{Msg, MutationMsg, UiMsg};
use crate::overlay::WidgetKind;
use crate::runtime::Runtime;
use crate::session::Session;
use crate::settings::Settings;

/// How long a `wait` step lets outstanding work run
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Overrides for timings and transport
    #[serde(default)]
    pub config: Option<AssistConfig>,
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub name: String,
    pub kind: ElementKind,
    /// `type` attribute for inputs
    #[serde(rename = "type", default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Input,
    Textarea,
    Contenteditable,
    /// Plain, non-editable block
    Div,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Move keyboard focus to an element
    Focus(String),
    /// Move focus to nothing
    Blur,
    Select {
        element: String,
        start: usize,
        end: usize,
    },
    /// Replace an element's text, as if the user typed it
    Type { element: String, text: String },
    /// Press a chord, e.g. `ctrl+shift+r`
    Key(String),
    /// Click the trigger, then the named menu entry
    Menu(String),
    /// Invoke an action directly
    Action(String),
    /// Fill in the open prompt dialog and submit it
    Prompt(String),
    /// Insert a new element into the page
    Add(ElementSpec),
    /// Remove an element from the page
    Remove(String),
    /// Let outstanding requests and timers finish
    Wait,
    Expect { element: String, text: String },
    /// The most recent toast's text
    ExpectToast(String),
}

/// Outcome of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Final text of every named element, in declaration order
    pub fields: Vec<(String, String)>,
    /// Every toast shown, in order
    pub toasts: Vec<String>,
    /// Failed expectations
    pub failures: Vec<String>,
}

impl ReplayReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    parse_scenario(&yaml).with_context(|| format!("Invalid scenario {}", path.display()))
}

pub fn parse_scenario(yaml: &str) -> Result<Scenario> {
    Ok(serde_yaml::from_str(yaml)?)
}

impl Scenario {
    /// Settings implied by the scenario, layered over `base`
    pub fn settings(&self, base: Settings) -> Settings {
        Settings {
            api_key: self.api_key.clone().or(base.api_key),
            model: self.model.clone().unwrap_or(base.model),
            ..base
        }
    }
}

/// Replay `scenario` against `generator`
pub fn replay<G: TextGenerator + ?Sized + 'static>(
    scenario: &Scenario,
    settings: Settings,
    config: AssistConfig,
    generator: Arc<G>,
) -> Result<ReplayReport> {
    let config = scenario.config.clone().unwrap_or(config);
    let mut session = Session::new(MemoryDom::new(), scenario.settings(settings), config);
    session.attach();

    let mut replay = Replayer {
        runtime: Runtime::new(session, generator),
        names: Vec::new(),
        nodes: HashMap::new(),
        last_toast: None,
        report: ReplayReport::default(),
    };
    for element in &scenario.elements {
        replay.create(element)?;
    }
    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(index, ?step, "replay step");
        replay
            .step(step)
            .with_context(|| format!("Step {} ({:?}) failed", index + 1, step))?;
        replay.record_toast();
    }

    replay.settle();
    Ok(replay.finish())
}

struct Replayer<G: TextGenerator + ?Sized + 'static> {
    runtime: Runtime<MemoryDom, G>,
    names: Vec<String>,
    nodes: HashMap<String, NodeId>,
    last_toast: Option<NodeId>,
    report: ReplayReport,
}

impl<G: TextGenerator + ?Sized + 'static> Replayer<G> {
    fn dom(&mut self) -> &mut MemoryDom {
        &mut self.runtime.session_mut().dom
    }

    fn node(&self, name: &str) -> Result<NodeId> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("Unknown element '{}'", name))
    }

    fn create(&mut self, spec: &ElementSpec) -> Result<NodeId> {
        if self.nodes.contains_key(&spec.name) {
            bail!("Duplicate element name '{}'", spec.name);
        }
        let dom = self.dom();
        let node = match spec.kind {
            ElementKind::Input => dom.add_input(spec.input_type.as_deref(), &spec.text),
            ElementKind::Textarea => dom.add_textarea(&spec.text),
            ElementKind::Contenteditable => dom.add_contenteditable(&spec.text),
            ElementKind::Div => {
                let body = dom.body();
                let node = dom.append_new(body, "div");
                dom.set_text_content(node, &spec.text);
                node
            }
        };
        self.names.push(spec.name.clone());
        self.nodes.insert(spec.name.clone(), node);
        Ok(node)
    }

    fn step(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Focus(name) => {
                let node = self.node(name)?;
                self.blur();
                self.dom().focus(node);
                self.runtime.dispatch(Msg::focus_in(node));
            }
            Step::Blur => self.blur(),
            Step::Select {
                element,
                start,
                end,
            } => {
                let node = self.node(element)?;
                let dom = self.dom();
                match SurfaceKind::of(&*dom, node) {
                    Some(kind) if kind.is_form_control() => {
                        dom.set_selection_range(node, *start, *end)
                    }
                    _ => dom.set_text_selection(node, *start, *end),
                }
            }
            Step::Type { element, text } => {
                let node = self.node(element)?;
                let dom = self.dom();
                match SurfaceKind::of(&*dom, node) {
                    Some(kind) if kind.is_form_control() => dom.set_value(node, text),
                    _ => dom.set_inner_text(node, text),
                }
            }
            Step::Key(chord) => {
                let keystroke = parse_key_string(chord)?;
                let claimed = self.runtime.key(keystroke);
                tracing::debug!(%keystroke, claimed, "replayed key");
            }
            Step::Menu(action) => {
                let action: ActionKind = action.parse().map_err(|e: String| anyhow!(e))?;
                let trigger = self
                    .runtime
                    .session()
                    .layer
                    .widget(WidgetKind::TriggerButton)
                    .map(|w| w.node)
                    .context("No trigger button is showing")?;
                self.runtime.dispatch(Msg::click(trigger));

                let session = self.runtime.session();
                let menu = session
                    .layer
                    .widget(WidgetKind::ActionMenu)
                    .map(|w| w.node)
                    .context("Menu did not open")?;
                let item = session
                    .dom
                    .descendants(menu)
                    .into_iter()
                    .find(|node| {
                        session.dom.attribute(*node, "data-action").as_deref()
                            == Some(action.name())
                    })
                    .with_context(|| format!("Menu has no '{}' entry", action))?;
                self.runtime.dispatch(Msg::click(item));
            }
            Step::Action(action) => {
                let action: ActionKind = action.parse().map_err(|e: String| anyhow!(e))?;
                self.runtime.dispatch(Msg::perform(action));
            }
            Step::Prompt(text) => {
                let session = self.runtime.session();
                let input = session
                    .layer
                    .prompt_input(&session.dom)
                    .context("No prompt dialog is open")?;
                self.dom().set_value(input, text);
                self.runtime.dispatch(Msg::Ui(UiMsg::SubmitPrompt));
            }
            Step::Add(spec) => {
                let node = self.create(spec)?;
                self.runtime
                    .dispatch(Msg::Mutation(MutationMsg::NodesAdded(vec![node])));
            }
            Step::Remove(name) => {
                let node = self.node(name)?;
                self.dom().remove(node);
                self.runtime
                    .dispatch(Msg::Mutation(MutationMsg::NodesRemoved(vec![node])));
            }
            Step::Wait => self.settle(),
            Step::Expect { element, text } => {
                let node = self.node(element)?;
                let actual = get_full_text(&self.runtime.session().dom, node);
                if &actual != text {
                    self.report.failures.push(format!(
                        "{}: expected {:?}, found {:?}",
                        element, text, actual
                    ));
                }
            }
            Step::ExpectToast(expected) => {
                let actual = self.report.toasts.last().cloned().unwrap_or_default();
                if &actual != expected {
                    self.report.failures.push(format!(
                        "toast: expected {:?}, found {:?}",
                        expected, actual
                    ));
                }
            }
        }
        Ok(())
    }

    fn blur(&mut self) {
        if let Some(previous) = self.runtime.session().dom.active_element() {
            self.dom().blur_all();
            self.runtime.dispatch(Msg::focus_out(previous));
        }
    }

    fn settle(&mut self) {
        // Toasts expire through the same channel, so record them as they land
        while self.runtime.in_flight() > 0 {
            if !self.runtime.pump_one(SETTLE_TIMEOUT) {
                tracing::warn!("replay gave up waiting for outstanding work");
                break;
            }
            self.record_toast();
        }
        self.runtime.pump();
        self.record_toast();
    }

    fn record_toast(&mut self) {
        let session = self.runtime.session();
        let Some(toast) = session.layer.widget(WidgetKind::Toast).map(|w| w.node) else {
            return;
        };
        if self.last_toast == Some(toast) {
            return;
        }
        let text = session.dom.inner_text(toast);
        self.last_toast = Some(toast);
        self.report.toasts.push(text);
    }

    fn finish(mut self) -> ReplayReport {
        let session = self.runtime.session();
        self.report.fields = self
            .names
            .iter()
            .filter_map(|name| {
                let node = self.nodes.get(name)?;
                Some((name.clone(), get_full_text(&session.dom, *node)))
            })
            .collect();
        self.report
    }
}
