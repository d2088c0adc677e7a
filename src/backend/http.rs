//! HTTP implementation of the backend contract

use super::{Backend, BackendError, HealthResponse, QueryRequest, QueryResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Backend reached over HTTP with JSON bodies.
///
/// No request timeout is set: a query that never settles keeps the
/// conversation pending.
pub struct HttpBackend {
    client: Client,
    query_url: String,
    health_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::unknown(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            client,
            query_url: format!("{base}/query"),
            health_url: format!("{base}/health"),
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(BackendError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            BackendError::invalid_response(format!("Failed to parse response: {e} - body: {body}"))
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        let response = self
            .client
            .post(&self.query_url)
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        let response = self.client.get(&self.health_url).send().await?;
        Self::read_json(response).await
    }
}
