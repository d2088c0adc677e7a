//! Request lifecycle state

use serde::{Deserialize, Serialize};

/// Lifecycle of the single outstanding query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for input, nothing in flight
    #[default]
    Idle,

    /// Query dispatched, waiting for it to settle
    Pending { query: String },
}

impl ChatState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ChatState::Pending { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChatState::Idle => "idle",
            ChatState::Pending { .. } => "pending",
        }
    }
}
