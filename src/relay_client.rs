//! Client side of the relay, for services that submit records to `POST /log`.

use crate::domain::LogPayload;
use crate::error::ClientError;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Per-request timeout for submissions.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: Url,
}

impl RelayClient {
    /// Client posting to `<base_url>/log`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Rejected(format!("Invalid relay URL {base_url:?}: {e}")))?;
        let endpoint = Url::parse(&format!("{}/log", base.as_str().trim_end_matches('/')))
            .map_err(|e| ClientError::Rejected(format!("Invalid relay URL {base_url:?}: {e}")))?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { client, endpoint })
    }

    /// Client for `LOGGER_BASE_URL`, or the local default.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&base_url_or_default(std::env::var("LOGGER_BASE_URL").ok()))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit one record and report whether the relay accepted it.
    pub async fn log(&self, payload: &LogPayload) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Submit one record, never failing. Delivery problems are reported as a
    /// local warning carrying the record.
    pub async fn log_background(&self, payload: &LogPayload) {
        if let Err(e) = self.log(payload).await {
            let record = payload.to_json_line().unwrap_or_default();
            warn!("Failed to send log to relay: {e}. Payload={record}");
        }
    }
}

/// The configured relay base URL, falling back to [`DEFAULT_BASE_URL`] when unset or blank.
fn base_url_or_default(raw: Option<String>) -> String {
    raw.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_joins_log_path() {
        let client = RelayClient::new("http://node-logger:4000/").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://node-logger:4000/log");

        let client = RelayClient::new("http://gateway/relay").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://gateway/relay/log");
    }

    #[test]
    fn test_base_url_defaults_to_local_relay() {
        assert_eq!(base_url_or_default(None), DEFAULT_BASE_URL);
        assert_eq!(base_url_or_default(Some("  ".into())), DEFAULT_BASE_URL);
        assert_eq!(
            base_url_or_default(Some("http://node-logger:4000".into())),
            "http://node-logger:4000"
        );
    }

    #[test]
    fn test_from_env_reads_logger_base_url() {
        // SAFETY: no other test reads or writes LOGGER_BASE_URL.
        unsafe {
            std::env::set_var("LOGGER_BASE_URL", "http://node-logger:4000");
        }
        let client = RelayClient::from_env().unwrap();
        unsafe {
            std::env::remove_var("LOGGER_BASE_URL");
        }
        assert_eq!(client.endpoint().as_str(), "http://node-logger:4000/log");

        let client = RelayClient::from_env().unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:4000/log");
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(RelayClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_log_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/log"))
            .and(body_json(json!({
                "stack": "backend", "level": "info", "pkg": "shortener",
                "message": "created short url", "meta": {"code": "abc"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = RelayClient::new(&server.uri()).unwrap();
        let payload = LogPayload::new("backend", "info", "shortener", "created short url")
            .with_meta(json!({"code": "abc"}));

        client.log(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn test_log_reports_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
            .mount(&server)
            .await;

        let client = RelayClient::new(&server.uri()).unwrap();
        let err = client
            .log(&LogPayload::new("s", "l", "p", "m"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 400, .. }));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_log_background_swallows_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RelayClient::new(&server.uri()).unwrap();
        client
            .log_background(&LogPayload::new("backend", "error", "exception", "boom"))
            .await;

        assert!(logs_contain("Failed to send log to relay"));
        assert!(logs_contain(r#""pkg":"exception""#));
    }
}
