//! Penmate - in-page AI writing assist
//!
//! This crate provides the core types and logic of a content-script writing
//! assistant implementing the Elm Architecture pattern: detecting editable
//! fields, drawing a floating trigger and menu over the page, sending the
//! field's text to a generation service, and splicing the answer back in
//! with one level of undo.

pub mod action;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dom;
pub mod editable;
pub mod error;
pub mod generation;
pub mod keymap;
pub mod messages;
pub mod orchestrator;
pub mod overlay;
pub mod runtime;
pub mod scenario;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod surface;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use action::ActionKind;
pub use commands::Cmd;
pub use config::AssistConfig;
pub use dom::{Dom, MemoryDom, NodeId};
pub use error::{AssistError, GenerationError};
pub use messages::Msg;
pub use runtime::Runtime;
pub use session::Session;
pub use update::{handle_keystroke, update, KeyOutcome};
