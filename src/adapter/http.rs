//! HTTP logging backend.
//!
//! Posts each record as JSON to a fixed endpoint. No timeout is applied to
//! the request; a stalled backend stalls only the request that hit it.

use crate::config::Credentials;
use crate::domain::LogPayload;
use crate::error::ClientError;
use crate::port::{LogClient, SendFuture};
use reqwest::{Client, header};
use serde_json::Value;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("log-relay/", env!("CARGO_PKG_VERSION"));

/// Header carrying the access code when one is configured.
pub const ACCESS_CODE_HEADER: &str = "x-access-code";

#[derive(Debug, Clone)]
pub struct HttpLogClient {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl HttpLogClient {
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClientError::Rejected(format!("Invalid backend URL {endpoint:?}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::Rejected(format!(
                "Unsupported backend URL scheme: {}",
                endpoint.scheme()
            )));
        }

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post(&self, payload: LogPayload) -> Result<Option<Value>, ClientError> {
        let mut request = self.client.post(self.endpoint.clone()).json(&payload);

        if self.credentials.has_client_pair() {
            request = request.basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            );
        }
        if !self.credentials.access_code.is_empty() {
            request = request.header(ACCESS_CODE_HEADER, &self.credentials.access_code);
        }

        let response = request.header(header::ACCEPT, "application/json").send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "Backend accepted record");

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl LogClient for HttpLogClient {
    fn name(&self) -> &str {
        "http"
    }

    fn send(&self, payload: LogPayload) -> SendFuture<'_> {
        Box::pin(self.post(payload))
    }
}
