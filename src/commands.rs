//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::time::Duration;

use crate::dom::NodeId;
use crate::generation::{GenerationPayload, RequestId};
use crate::messages::Msg;

/// Side effects returned by `update`
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Call the text generator off the event loop.
    /// Sends `Msg::Generation(Completed)` when done.
    Generate {
        request: RequestId,
        payload: GenerationPayload,
    },
    /// Send `msg` back after `delay`
    Delay { delay: Duration, msg: Box<Msg> },
    /// Move keyboard focus to a node once the current event has finished
    FocusNode(NodeId),
}

impl Cmd {
    pub fn delay(delay: Duration, msg: Msg) -> Self {
        Cmd::Delay {
            delay,
            msg: Box::new(msg),
        }
    }
}
