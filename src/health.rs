//! One-shot backend health probe
//!
//! The probe runs once per session. A backend that goes away later is not
//! noticed until the next start.

use crate::backend::{Backend, BackendError, HealthResponse};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Backend liveness as shown on the status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    Unknown,
    Ok,
    Offline,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthStatus::Ok)
    }

    pub fn badge_text(&self) -> &'static str {
        if self.is_ok() {
            "System Operational"
        } else {
            "System Offline"
        }
    }
}

/// Outcome of the probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Status string as reported by the backend, if it answered
    pub reported: Option<String>,
    pub components: BTreeMap<String, bool>,
}

impl HealthReport {
    pub fn from_probe(result: Result<HealthResponse, BackendError>) -> Self {
        match result {
            Ok(health) => {
                let status = if health.is_ok() {
                    HealthStatus::Ok
                } else {
                    tracing::warn!(reported = %health.status, "Backend reports not healthy");
                    HealthStatus::Offline
                };
                Self {
                    status,
                    reported: Some(health.status),
                    components: health.components,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = e.kind.as_str(), "Backend unreachable");
                Self {
                    status: HealthStatus::Offline,
                    reported: None,
                    components: BTreeMap::new(),
                }
            }
        }
    }
}

/// Publishes the probe outcome. Consumed by the probe, so it can only run once.
pub struct HealthMonitor {
    tx: watch::Sender<HealthReport>,
}

impl HealthMonitor {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(HealthReport::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthReport> {
        self.tx.subscribe()
    }

    pub async fn probe<B: Backend + ?Sized>(self, backend: &B) -> HealthReport {
        self.publish(HealthReport::from_probe(backend.health().await))
    }

    /// Run the probe in the background, independent of any query.
    ///
    /// A report is always published, even if the backend panics.
    pub fn spawn<B: Backend + ?Sized + 'static>(self, backend: Arc<B>) -> JoinHandle<HealthReport> {
        tokio::spawn(async move {
            let call = tokio::spawn(async move { backend.health().await });

            let result = match call.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Health probe task aborted");
                    Err(BackendError::unknown(e.to_string()))
                }
            };
            self.publish(HealthReport::from_probe(result))
        })
    }

    fn publish(self, report: HealthReport) -> HealthReport {
        self.tx.send_replace(report.clone());
        report
    }
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}
