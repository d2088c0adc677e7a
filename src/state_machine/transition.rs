//! Pure state transition function
//!
//! Given the same state and event this always produces the same result and
//! performs no I/O. The runtime executes the returned effects.

use super::{ChatState, Effect, Event};
use crate::conversation::Message;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected transitions. None of these mutate anything.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A query is already pending")]
    RequestPending,
    #[error("Nothing to send")]
    EmptyQuery,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + blank submit -> reject
        (ChatState::Idle, Event::UserSubmit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyQuery)
        }

        // Idle + submit -> Pending
        (ChatState::Idle, Event::UserSubmit { text, at }) => {
            Ok(TransitionResult::new(ChatState::Pending {
                query: text.clone(),
            })
            .with_effect(Effect::append(Message::user(text.clone(), at)))
            .with_effect(Effect::ClearInput)
            .with_effect(Effect::NotifyPending { pending: true })
            .with_effect(Effect::DispatchQuery { query: text }))
        }

        // Only one query at a time
        (ChatState::Pending { .. }, Event::UserSubmit { .. }) => {
            Err(TransitionError::RequestPending)
        }

        // Pending + answer -> Idle
        (ChatState::Pending { .. }, Event::QueryCompleted { reply, at }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::append(Message::assistant(reply, at)))
                .with_effect(Effect::NotifyPending { pending: false }))
        }

        // Pending + failure -> Idle with the fixed fallback; the cause stays out of the transcript
        (ChatState::Pending { .. }, Event::QueryFailed { at, .. }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::append(Message::unavailable(at)))
                .with_effect(Effect::NotifyPending { pending: false }))
        }

        // Settlement with nothing in flight
        (ChatState::Idle, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from idle with event {event:?}"
        ))),
    }
}
