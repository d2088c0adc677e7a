//! Effects produced by state transitions

use crate::conversation::Message;

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append to the transcript
    AppendMessage { message: Message },

    /// Empty the input buffer
    ClearInput,

    /// Send the query to the backend
    DispatchQuery { query: String },

    /// Tell subscribers the pending flag flipped
    NotifyPending { pending: bool },
}

impl Effect {
    pub fn append(message: Message) -> Self {
        Effect::AppendMessage { message }
    }
}
