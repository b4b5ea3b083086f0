//! Failures the assist core reports to the user.
//!
//! None of these escape to the host page. Every one is caught at the
//! orchestration boundary and turned into a toast whose text is the
//! `Display` output.

use thiserror::Error;

use crate::action::ActionKind;
use crate::surface::SurfaceId;

/// Failure of the remote text generation call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct GenerationError {
    /// HTTP status, when the service answered at all
    pub status: Option<u16>,
    pub reason: String,
}

impl GenerationError {
    /// Non-success HTTP response
    pub fn http(status: u16) -> Self {
        Self {
            status: Some(status),
            reason: format!("API request failed with status {}", status),
        }
    }

    /// Transport failure or malformed response
    pub fn transport(reason: impl Into<String>) -> Self {
        Self {
            status: None,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistError {
    #[error("Please click in a text field first")]
    NoTargetSurface,

    #[error("Please select text to {}", .action.name())]
    EmptySelection { action: ActionKind },

    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error("Please set your OpenAI API key in the extension settings")]
    MissingCredential,

    #[error("Error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Error inserting text: unsupported field <{tag}>")]
    UnsupportedSurface { tag: String },

    #[error("Error: the text field (#{surface}) is no longer on the page")]
    StaleTarget { surface: SurfaceId },
}

impl AssistError {
    /// Whether this only tells the user what to do next, as opposed to a
    /// failure of something they asked for
    pub fn is_guidance(&self) -> bool {
        matches!(
            self,
            AssistError::NoTargetSurface
                | AssistError::EmptySelection { .. }
                | AssistError::EmptyPrompt
                | AssistError::MissingCredential
        )
    }
}
