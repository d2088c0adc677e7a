//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::backend::BackendErrorKind;
use crate::conversation::{Message, MessageRole, Reply, Source};
use chrono::{Local, TimeZone};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn fixed_time() -> chrono::DateTime<Local> {
    Local.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn arb_source() -> impl Strategy<Value = Option<Source>> {
    prop_oneof![
        Just(None),
        Just(Some(Source::Dataset)),
        Just(Some(Source::Engine)),
        Just(Some(Source::KnowledgeBase)),
        Just(Some(Source::Error)),
    ]
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    ("[a-zA-Z0-9 ]{0,40}", arb_source(), proptest::option::of(0.0f64..=1.0)).prop_map(
        |(content, source, confidence)| Reply {
            content,
            source,
            confidence,
        },
    )
}

fn arb_error_kind() -> impl Strategy<Value = BackendErrorKind> {
    prop_oneof![
        Just(BackendErrorKind::Network),
        Just(BackendErrorKind::Timeout),
        Just(BackendErrorKind::ServerError),
        Just(BackendErrorKind::ClientError),
        Just(BackendErrorKind::InvalidResponse),
        Just(BackendErrorKind::Unknown),
    ]
}

fn arb_submit() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z ?]{1,30}".prop_map(|text| Event::UserSubmit {
            text,
            at: fixed_time()
        }),
        "[ \t\n]{0,5}".prop_map(|text| Event::UserSubmit {
            text,
            at: fixed_time()
        }),
    ]
}

fn arb_settlement() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_reply().prop_map(|reply| Event::QueryCompleted {
            reply,
            at: fixed_time()
        }),
        ("[a-zA-Z ]{1,30}", arb_error_kind()).prop_map(|(message, kind)| Event::QueryFailed {
            message,
            kind,
            at: fixed_time()
        }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![arb_submit(), arb_settlement()]
}

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![
        Just(ChatState::Idle),
        "[a-zA-Z ]{1,30}".prop_map(|query| ChatState::Pending { query }),
    ]
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Minimal executor: applies transitions and keeps the transcript the effects build
#[derive(Default)]
struct Model {
    state: ChatState,
    transcript: Vec<Message>,
    dispatched: usize,
}

impl Model {
    fn apply(&mut self, event: Event) -> Result<(), TransitionError> {
        let result = transition(&self.state, event)?;
        self.state = result.new_state;
        for effect in result.effects {
            match effect {
                Effect::AppendMessage { message } => self.transcript.push(message),
                Effect::DispatchQuery { .. } => self.dispatched += 1,
                Effect::ClearInput | Effect::NotifyPending { .. } => {}
            }
        }
        Ok(())
    }

    fn count(&self, role: MessageRole) -> usize {
        self.transcript.iter().filter(|m| m.role == role).count()
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: one reply per submission, and at most one in flight
    #[test]
    fn prop_one_reply_per_submission(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut model = Model::default();
        for event in events {
            let _ = model.apply(event);

            let users = model.count(MessageRole::User);
            let assistants = model.count(MessageRole::Assistant);
            if model.state.is_pending() {
                prop_assert_eq!(users, assistants + 1);
            } else {
                prop_assert_eq!(users, assistants);
            }
            prop_assert_eq!(model.dispatched, users);
        }
    }

    // Invariant 2: the transcript alternates user / assistant
    #[test]
    fn prop_transcript_alternates(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut model = Model::default();
        for event in events {
            let _ = model.apply(event);
        }
        for (i, msg) in model.transcript.iter().enumerate() {
            let expected = if i % 2 == 0 { MessageRole::User } else { MessageRole::Assistant };
            prop_assert_eq!(msg.role, expected);
        }
    }

    // Invariant 3: rejected events change nothing
    #[test]
    fn prop_rejection_has_no_effects(state in arb_state(), event in arb_event()) {
        let mut model = Model { state: state.clone(), ..Model::default() };
        if model.apply(event).is_err() {
            prop_assert_eq!(model.state, state);
            prop_assert!(model.transcript.is_empty());
            prop_assert_eq!(model.dispatched, 0);
        }
    }

    // Invariant 4: pending rejects every submission
    #[test]
    fn prop_pending_rejects_submit(state in "[a-zA-Z ]{1,30}", event in arb_submit()) {
        let state = ChatState::Pending { query: state };
        let result = transition(&state, event);
        prop_assert!(matches!(result, Err(TransitionError::RequestPending)));
    }

    // Invariant 5: blank text never leaves idle
    #[test]
    fn prop_blank_submit_rejected(text in "[ \t\n]{0,8}") {
        let result = transition(&ChatState::Idle, Event::UserSubmit { text, at: fixed_time() });
        prop_assert!(matches!(result, Err(TransitionError::EmptyQuery)));
    }

    // Invariant 6: any settlement returns pending to idle with exactly one assistant message
    #[test]
    fn prop_settlement_returns_idle(state in "[a-zA-Z ]{1,30}", event in arb_settlement()) {
        let failed = matches!(event, Event::QueryFailed { .. });
        let result = transition(&ChatState::Pending { query: state }, event).unwrap();
        prop_assert_eq!(&result.new_state, &ChatState::Idle);

        let messages: Vec<&Message> = result.effects.iter().filter_map(|e| match e {
            Effect::AppendMessage { message } => Some(message),
            _ => None,
        }).collect();
        prop_assert_eq!(messages.len(), 1);
        prop_assert_eq!(messages[0].role, MessageRole::Assistant);
        prop_assert_eq!(messages[0].is_error, failed);
        let unlocked = result.effects.contains(&Effect::NotifyPending { pending: false });
        prop_assert!(unlocked);
    }

    // Invariant 7: a settlement with nothing in flight is rejected
    #[test]
    fn prop_idle_rejects_settlement(event in arb_settlement()) {
        let result = transition(&ChatState::Idle, event);
        prop_assert!(matches!(result, Err(TransitionError::InvalidTransition(_))));
    }
}
