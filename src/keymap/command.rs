//! Command enum representing every action reachable from the keyboard
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to one `Msg` for the Elm-style update loop.

use std::str::FromStr;

use crate::action::ActionKind;
use crate::messages::{Msg, UiMsg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Open the prompt dialog for free-form generation
    Generate,
    /// Rewrite the selection
    Rewrite,
    /// Summarize the selection, or the whole field without one
    Summarize,
    /// Expand the selection
    Expand,
    /// Open the action menu next to the current trigger
    OpenMenu,
    /// Undo the last assist edit
    RestoreSnapshot,
    /// Submit the open prompt dialog
    SubmitPrompt,
    /// Close the prompt dialog or the action menu
    Dismiss,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Generate,
        Command::Rewrite,
        Command::Summarize,
        Command::Expand,
        Command::OpenMenu,
        Command::RestoreSnapshot,
        Command::SubmitPrompt,
        Command::Dismiss,
    ];

    /// Convert this command to a message for the Elm update loop
    pub fn to_msg(self) -> Msg {
        match self {
            Command::Generate => Msg::Ui(UiMsg::PerformAction(ActionKind::Generate)),
            Command::Rewrite => Msg::Ui(UiMsg::PerformAction(ActionKind::Rewrite)),
            Command::Summarize => Msg::Ui(UiMsg::PerformAction(ActionKind::Summarize)),
            Command::Expand => Msg::Ui(UiMsg::PerformAction(ActionKind::Expand)),
            Command::OpenMenu => Msg::Ui(UiMsg::ShowMenu),
            Command::RestoreSnapshot => Msg::Ui(UiMsg::RestoreSnapshot),
            Command::SubmitPrompt => Msg::Ui(UiMsg::SubmitPrompt),
            Command::Dismiss => Msg::Ui(UiMsg::Dismiss),
        }
    }

    /// Name used in keymap files
    pub fn name(self) -> &'static str {
        match self {
            Command::Generate => "Generate",
            Command::Rewrite => "Rewrite",
            Command::Summarize => "Summarize",
            Command::Expand => "Expand",
            Command::OpenMenu => "OpenMenu",
            Command::RestoreSnapshot => "RestoreSnapshot",
            Command::SubmitPrompt => "SubmitPrompt",
            Command::Dismiss => "Dismiss",
        }
    }

    /// Get a display name for this command (for help output)
    pub fn display_name(self) -> &'static str {
        match self {
            Command::Generate => "Generate Text",
            Command::Rewrite => "Rewrite Selection",
            Command::Summarize => "Summarize",
            Command::Expand => "Expand Selection",
            Command::OpenMenu => "Open Assist Menu",
            Command::RestoreSnapshot => "Undo Assist Edit",
            Command::SubmitPrompt => "Submit Prompt",
            Command::Dismiss => "Dismiss",
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or(())
    }
}
