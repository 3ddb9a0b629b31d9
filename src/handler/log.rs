use crate::domain::{ForwardResult, LogPayload};
use crate::forwarder::LogForwarder;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Body returned for every request that does not describe a log record.
pub const INVALID_BODY_MESSAGE: &str = "Invalid body. Expected { stack, level, pkg, message, meta? }";

#[derive(Debug, Serialize)]
struct Accepted {
    ok: bool,
    result: ForwardResult,
}

/// Whether the request declares a JSON body (`application/json`, any parameters).
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

fn invalid_body() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": INVALID_BODY_MESSAGE })),
    )
        .into_response()
}

/// Handler for POST /log
pub async fn log_handler(
    State(forwarder): State<Arc<LogForwarder>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !has_json_content_type(&headers) {
        debug!(body_size = body.len(), "Rejected log body without a JSON content type");
        return invalid_body();
    }

    let payload = match LogPayload::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(body_size = body.len(), "Rejected log body: {e}");
            return invalid_body();
        }
    };

    match forwarder.forward(payload).await {
        Ok(result) => {
            info!(fallback = result.is_fallback(), "Forwarded log record");
            Json(Accepted { ok: true, result }).into_response()
        }
        Err(e) => {
            error!("Failed to forward log record: {e}");
            let message = e.to_string();
            let message = if message.is_empty() {
                "Unknown error".to_string()
            } else {
                message
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": message })),
            )
                .into_response()
        }
    }
}
