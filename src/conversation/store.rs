//! Append-only transcript

use super::Message;
use crate::runtime::ClientEvent;
use chrono::Local;
use tokio::sync::broadcast;

/// Ordered transcript of the session.
///
/// Messages are never edited, removed or re-sorted once appended. Index 0 is
/// always the greeting.
pub struct ConversationStore {
    messages: Vec<Message>,
    notify_tx: broadcast::Sender<ClientEvent>,
}

impl ConversationStore {
    pub fn new(notify_tx: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            messages: vec![Message::greeting(Local::now())],
            notify_tx,
        }
    }

    /// Add a message to the end of the transcript and notify subscribers
    pub fn append(&mut self, message: Message) {
        let index = self.messages.len();
        self.messages.push(message.clone());
        // No subscribers is fine
        let _ = self
            .notify_tx
            .send(ClientEvent::MessageAppended { index, message });
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
