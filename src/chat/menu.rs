//! Parsing for the interactive menu and review prompts.

use crate::assistant::EditOperation;

/// Top-level menu actions, in the order they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Rewrite,
    Rephrase,
    Expand,
    Show,
    Save,
    Undo,
    History,
}

impl MenuChoice {
    /// Accepts the menu digit or the action name.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0" | "rewrite" => Some(Self::Rewrite),
            "1" | "rephrase" => Some(Self::Rephrase),
            "2" | "expand" => Some(Self::Expand),
            "3" | "show" => Some(Self::Show),
            "4" | "save" => Some(Self::Save),
            "5" | "undo" => Some(Self::Undo),
            "6" | "history" => Some(Self::History),
            _ => None,
        }
    }

    /// The passage operation this choice maps to, if any.
    pub fn operation(&self) -> Option<EditOperation> {
        match self {
            Self::Rewrite => Some(EditOperation::Rewrite),
            Self::Rephrase => Some(EditOperation::Rephrase),
            Self::Expand => Some(EditOperation::Expand),
            _ => None,
        }
    }
}

pub fn menu_text() -> String {
    [
        "What would you like to do?",
        "0 - Rewrite a portion or phrase",
        "1 - Rephrase a portion or phrase",
        "2 - Write for me (expand on portion or phrase)",
        "3 - Show full essay",
        "4 - Save and exit",
        "5 - Undo last accepted edit",
        "6 - Show edit history",
    ]
    .join("\n")
}

/// Accept/reject answer for a proposed revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    Accept,
    Reject,
}

impl ReviewChoice {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Self::Accept),
            "n" | "no" => Some(Self::Reject),
            _ => None,
        }
    }
}
