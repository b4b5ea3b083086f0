//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. The host environment
//! translates page events (focus, mutation observer records, clicks) into
//! messages; the runtime feeds back timer and network results the same way.

use crate::action::ActionKind;
use crate::dom::NodeId;
use crate::error::GenerationError;
use crate::generation::RequestId;
use crate::settings::Settings;
use crate::surface::SurfaceId;

/// Page-wide focus changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusMsg {
    /// `focusin` on any element
    FocusIn { target: NodeId },
    /// `focusout` on any element
    FocusOut { target: NodeId },
    /// The grace window after a surface lost focus has passed
    BlurGraceElapsed { surface: SurfaceId },
}

/// Structural changes reported by the page's mutation observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationMsg {
    /// Nodes inserted anywhere under `<body>` (roots of inserted subtrees)
    NodesAdded(Vec<NodeId>),
    /// Nodes removed from anywhere under `<body>`
    NodesRemoved(Vec<NodeId>),
    /// The direct children of `<body>` changed
    BodyChildrenChanged,
}

/// Floating UI interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMsg {
    /// Capture-phase click anywhere on the page
    Click { target: NodeId },
    /// Pointer pressed anywhere on the page
    PointerDown { target: NodeId },
    /// Fallback timer after a pointer press on the trigger
    PointerFallback { target: NodeId },
    /// A toast's display time is over
    ToastExpired { node: NodeId },
    /// Open the action menu for the current trigger
    ShowMenu,
    /// Run an action against the current surface
    PerformAction(ActionKind),
    /// Submit the prompt dialog
    SubmitPrompt,
    /// Close the prompt dialog without generating
    CancelPrompt,
    /// Close the prompt dialog or the menu, whichever is open
    Dismiss,
    /// Undo the last assist edit
    RestoreSnapshot,
}

/// Results of generation calls
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMsg {
    Completed {
        request: RequestId,
        result: Result<String, GenerationError>,
    },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Focus(FocusMsg),
    Mutation(MutationMsg),
    Ui(UiMsg),
    Generation(GenerationMsg),
    /// Settings store changed
    Settings(Settings),
}

// Convenience constructors for host bindings
impl Msg {
    pub fn focus_in(target: NodeId) -> Self {
        Msg::Focus(FocusMsg::FocusIn { target })
    }

    pub fn focus_out(target: NodeId) -> Self {
        Msg::Focus(FocusMsg::FocusOut { target })
    }

    pub fn click(target: NodeId) -> Self {
        Msg::Ui(UiMsg::Click { target })
    }

    pub fn perform(action: ActionKind) -> Self {
        Msg::Ui(UiMsg::PerformAction(action))
    }
}
