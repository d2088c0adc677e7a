//! Transcript entries

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Greeting placed at index 0 of every transcript
pub const GREETING: &str =
    "Hello! I am your BFSI Assistant. I can help with loans, EMIs, documentation, and banking policies.";

/// Content of the bubble shown when a query could not be answered
pub const UNAVAILABLE_TEXT: &str =
    "I'm unavailable right now. Please check if the backend is running.";

/// Display format for message timestamps (hour:minute, local time)
const TIME_FORMAT: &str = "%H:%M";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Provenance of an assistant answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    System,
    Dataset,
    Engine,
    KnowledgeBase,
    Error,
}

impl Source {
    /// Parse a backend source tag, accepting the backend's tier names as aliases
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Source::System),
            "dataset" => Some(Source::Dataset),
            "engine" | "slm" => Some(Source::Engine),
            "knowledge-base" | "knowledge_base" | "rag" => Some(Source::KnowledgeBase),
            "error" | "system_error" => Some(Source::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::System => "system",
            Source::Dataset => "dataset",
            Source::Engine => "engine",
            Source::KnowledgeBase => "knowledge-base",
            Source::Error => "error",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful answer as handed to the transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    pub source: Option<Source>,
    pub confidence: Option<f64>,
}

/// One transcript entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    /// Creation time formatted for display
    pub timestamp: String,
    pub created_at: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Client-synthesized failure, as opposed to a backend-authored answer
    #[serde(default)]
    pub is_error: bool,
}

impl Message {
    fn new(role: MessageRole, content: String, at: DateTime<Local>) -> Self {
        Self {
            role,
            content,
            timestamp: at.format(TIME_FORMAT).to_string(),
            created_at: at,
            source: None,
            confidence: None,
            is_error: false,
        }
    }

    pub fn user(content: impl Into<String>, at: DateTime<Local>) -> Self {
        Self::new(MessageRole::User, content.into(), at)
    }

    pub fn greeting(at: DateTime<Local>) -> Self {
        Self {
            source: Some(Source::System),
            ..Self::new(MessageRole::Assistant, GREETING.to_string(), at)
        }
    }

    pub fn assistant(reply: Reply, at: DateTime<Local>) -> Self {
        Self {
            source: reply.source,
            confidence: reply.confidence,
            ..Self::new(MessageRole::Assistant, reply.content, at)
        }
    }

    /// The fixed fallback shown in place of an answer. Carries no failure cause.
    pub fn unavailable(at: DateTime<Local>) -> Self {
        Self {
            source: Some(Source::Error),
            is_error: true,
            ..Self::new(MessageRole::Assistant, UNAVAILABLE_TEXT.to_string(), at)
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Upper-cased source tag for the meta line; system messages show none
    pub fn source_label(&self) -> Option<String> {
        match self.source {
            None | Some(Source::System) => None,
            Some(source) => Some(source.as_str().to_ascii_uppercase()),
        }
    }
}
