//! Events that drive the request lifecycle

use crate::backend::BackendErrorKind;
use crate::conversation::Reply;
use chrono::{DateTime, Local};

/// Events that trigger state transitions.
///
/// Each event carries the wall-clock time it happened so the transition
/// function can stamp messages without reading the clock.
#[derive(Debug, Clone)]
pub enum Event {
    /// User asked a question
    UserSubmit { text: String, at: DateTime<Local> },

    /// Backend answered
    QueryCompleted { reply: Reply, at: DateTime<Local> },

    /// Query could not be answered, for whatever reason
    QueryFailed {
        message: String,
        kind: BackendErrorKind,
        at: DateTime<Local>,
    },
}

impl Event {
    pub fn submit(text: impl Into<String>) -> Self {
        Event::UserSubmit {
            text: text.into(),
            at: Local::now(),
        }
    }

    pub fn completed(reply: Reply) -> Self {
        Event::QueryCompleted {
            reply,
            at: Local::now(),
        }
    }

    pub fn failed(message: impl Into<String>, kind: BackendErrorKind) -> Self {
        Event::QueryFailed {
            message: message.into(),
            kind,
            at: Local::now(),
        }
    }
}
