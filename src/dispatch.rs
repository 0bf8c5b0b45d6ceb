use crate::error::DispatchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seam between the pipeline and whatever persists alerts.
///
/// The pipeline issues `dispatch` fire-and-forget; an error here is reported
/// to the operator log and never reaches the classification state.
#[async_trait]
pub trait LogDispatcher: Send + Sync {
    async fn dispatch(&self, message: &str) -> Result<(), DispatchError>;
}

/// A stored violation record as returned by the sink's read endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct LogMessage<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct LogsEnvelope {
    #[allow(dead_code)]
    success: bool,
    #[serde(default)]
    logs: Vec<LogRecord>,
}

/// Client for the posture log sink: POST `/api/logs` to store one violation
/// reason, GET `/api/logs` to read back stored records, newest first.
pub struct HttpLogDispatcher {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLogDispatcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retrieves previously stored records. Used by the report path, never
    /// by the per-frame pipeline.
    pub async fn fetch_logs(&self) -> Result<Vec<LogRecord>, DispatchError> {
        let url = format!("{}/api/logs", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DispatchError::Server(response.status().as_u16()));
        }

        let envelope: LogsEnvelope = response
            .json()
            .await
            .map_err(|e| DispatchError::Decode(e.to_string()))?;

        Ok(envelope.logs)
    }
}

#[async_trait]
impl LogDispatcher for HttpLogDispatcher {
    async fn dispatch(&self, message: &str) -> Result<(), DispatchError> {
        let url = format!("{}/api/logs", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&LogMessage { message })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        // Success/failure is all we consume; the body is the sink's concern.
        if response.status().is_success() {
            Ok(())
        } else {
            Err(DispatchError::Server(response.status().as_u16()))
        }
    }
}

/// Dispatcher that drops everything, for offline runs and tests.
pub struct NullDispatcher;

#[async_trait]
impl LogDispatcher for NullDispatcher {
    async fn dispatch(&self, _message: &str) -> Result<(), DispatchError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_the_reason_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logs"))
            .and(body_json(json!({
                "message": "⚠️ Back angle < 150° — Bad posture!"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = HttpLogDispatcher::new(server.uri());
        dispatcher
            .dispatch("⚠️ Back angle < 150° — Bad posture!")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_success_status_becomes_a_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dispatcher = HttpLogDispatcher::new(server.uri());
        let err = dispatcher.dispatch("anything").await.unwrap_err();
        assert!(matches!(err, DispatchError::Server(500)));
    }

    #[tokio::test]
    async fn unreachable_sink_becomes_a_network_error() {
        let dispatcher = HttpLogDispatcher::new("http://127.0.0.1:9")
            .with_timeout(Duration::from_millis(300));
        let err = dispatcher.dispatch("anything").await.unwrap_err();
        assert!(matches!(err, DispatchError::Network(_)));
    }

    #[tokio::test]
    async fn fetch_logs_parses_the_sink_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "logs": [
                    {
                        "message": "⚠️ Knee over toe — Bad posture!",
                        "timestamp": "2024-05-04T12:30:00Z"
                    },
                    {
                        "message": "⚠️ Back angle < 150° — Bad posture!",
                        "timestamp": "2024-05-04T12:29:00Z"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let dispatcher = HttpLogDispatcher::new(server.uri());
        let logs = dispatcher.fetch_logs().await.unwrap();
        assert_eq!(logs.len(), 2);
        // Newest first, as the sink stores them.
        assert!(logs[0].timestamp > logs[1].timestamp);
        assert_eq!(logs[0].message, "⚠️ Knee over toe — Bad posture!");
    }
}
