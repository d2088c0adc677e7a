//! Remote assistant backend
//!
//! The client consumes two endpoints: `POST /query` answers a question and
//! `GET /health` reports liveness.

mod error;
mod http;
mod types;

pub use error::{BackendError, BackendErrorKind};
pub use http::HttpBackend;
pub use types::{HealthResponse, QueryRequest, QueryResponse};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Common interface for the assistant backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Ask a question
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError>;

    /// Liveness probe
    async fn health(&self) -> Result<HealthResponse, BackendError>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        (**self).query(request).await
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        (**self).health().await
    }
}

/// Logging wrapper for backends
pub struct LoggingBackend<B> {
    inner: B,
}

impl<B: Backend> LoggingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: Backend> Backend for LoggingBackend<B> {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        let start = Instant::now();
        let result = self.inner.query(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    query_len = request.query.len(),
                    source = ?response.source,
                    confidence = ?response.confidence,
                    "Query answered"
                );
            }
            Err(e) if e.kind.is_transport() => {
                tracing::warn!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Query failed, backend unreachable"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    status = ?e.status,
                    "Query failed"
                );
            }
        }

        result
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        let start = Instant::now();
        let result = self.inner.health().await;
        let duration = start.elapsed();

        match &result {
            Ok(health) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    status = %health.status,
                    "Health probe answered"
                );
            }
            Err(e) => {
                tracing::warn!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "Health probe failed"
                );
            }
        }

        result
    }
}
