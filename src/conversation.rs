//! Conversation transcript: messages and the append-only store

mod message;
mod store;

pub use message::{Message, MessageRole, Reply, Source, GREETING, UNAVAILABLE_TEXT};
pub use store::ConversationStore;
