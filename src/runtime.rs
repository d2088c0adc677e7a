//! Runtime for a chat session
//!
//! One task owns the transcript, the input buffer and the request state.
//! The presentation layer talks to it through a [`ChatHandle`] and watches
//! it through [`ClientEvent`] broadcasts.

mod executor;


pub use executor::ChatRuntime;

use crate::backend::Backend;
use crate::conversation::Message;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

/// Notifications sent to the presentation layer
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Transcript grew; render it and scroll to `index`
    MessageAppended { index: usize, message: Message },
    PendingChanged { pending: bool },
    InputChanged { text: String },
}

/// Requests from the presentation layer
#[derive(Debug)]
pub(crate) enum Command {
    SetText(String),
    /// Submit `text`, or the buffer content when `None`
    Submit { text: Option<String> },
    Snapshot(oneshot::Sender<Snapshot>),
}

/// Point-in-time copy of the session for rendering
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub messages: Vec<Message>,
    pub pending: bool,
    pub input: String,
}

impl Snapshot {
    /// Whether the send affordance is enabled
    pub fn can_send(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }
}

#[derive(Debug, Error)]
#[error("Chat runtime has stopped")]
pub struct RuntimeStopped;

/// Handle to interact with a running chat session
#[derive(Clone)]
pub struct ChatHandle {
    command_tx: mpsc::Sender<Command>,
    broadcast_tx: broadcast::Sender<ClientEvent>,
}

impl ChatHandle {
    pub async fn set_text(&self, text: impl Into<String>) -> Result<(), RuntimeStopped> {
        self.send(Command::SetText(text.into())).await
    }

    /// Submit the buffer content. Ignored when blank or while a query is pending.
    pub async fn submit(&self) -> Result<(), RuntimeStopped> {
        self.send(Command::Submit { text: None }).await
    }

    /// Submit `text` directly. Same rules as [`ChatHandle::submit`].
    pub async fn submit_text(&self, text: impl Into<String>) -> Result<(), RuntimeStopped> {
        self.send(Command::Submit {
            text: Some(text.into()),
        })
        .await
    }

    pub async fn snapshot(&self) -> Result<Snapshot, RuntimeStopped> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx)).await?;
        rx.await.map_err(|_| RuntimeStopped)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.broadcast_tx.subscribe()
    }

    async fn send(&self, command: Command) -> Result<(), RuntimeStopped> {
        self.command_tx.send(command).await.map_err(|_| RuntimeStopped)
    }
}

/// Start a chat session against `backend`.
///
/// The session runs until every [`ChatHandle`] is dropped.
pub fn start<B: Backend + 'static>(backend: B) -> (ChatHandle, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::channel(32);
    let (broadcast_tx, _) = broadcast::channel(128);

    let runtime = ChatRuntime::new(Arc::new(backend), command_rx, broadcast_tx.clone());
    let join = tokio::spawn(runtime.run());

    (
        ChatHandle {
            command_tx,
            broadcast_tx,
        },
        join,
    )
}

/// Messages already broadcast but not yet read from `events`, without waiting
pub fn drain_appended(events: &mut broadcast::Receiver<ClientEvent>) -> Vec<Message> {
    let mut messages = Vec::new();
    loop {
        match events.try_recv() {
            Ok(ClientEvent::MessageAppended { message, .. }) => messages.push(message),
            Ok(_) | Err(TryRecvError::Lagged(_)) => {}
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
    messages
}
