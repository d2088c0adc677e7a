//! Wire types for the query and health endpoints

use crate::conversation::{Reply, Source};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Body returned by `POST /query`. Only `response` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl QueryResponse {
    /// Normalize into a transcript reply.
    ///
    /// Unknown source tags are dropped, as is a confidence outside [0, 1].
    pub fn into_reply(self) -> Reply {
        let source = self.source.as_deref().and_then(|tag| {
            let parsed = Source::from_tag(tag);
            if parsed.is_none() {
                tracing::debug!(tag = %tag, "Unrecognized source tag");
            }
            parsed
        });

        let confidence = self.confidence.filter(|c| {
            let valid = c.is_finite() && (0.0..=1.0).contains(c);
            if !valid {
                tracing::debug!(confidence = %c, "Discarding out-of-range confidence");
            }
            valid
        });

        Reply {
            content: self.response,
            source,
            confidence,
        }
    }
}

/// Body returned by `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Availability of each answer tier (`matcher`, `slm`, `rag`)
    #[serde(default)]
    pub components: BTreeMap<String, bool>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
