//! Generation results

use crate::commands::Cmd;
use crate::dom::Dom;
use crate::messages::GenerationMsg;
use crate::orchestrator;
use crate::session::Session;

/// Handle generation results
pub fn update_generation<D: Dom>(session: &mut Session<D>, msg: GenerationMsg) -> Option<Cmd> {
    match msg {
        GenerationMsg::Completed { request, result } => {
            orchestrator::complete_generation(session, request, result)
        }
    }
}
