use crate::config::BODY_LIMIT_BYTES;
use crate::forwarder::LogForwarder;
use crate::handler::health::health_handler;
use crate::handler::log::log_handler;
use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Response, StatusCode, header};
use axum::routing::{get, post};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Build the relay router (health + log submission).
pub fn main_router(forwarder: Arc<LogForwarder>) -> Router {
    let health_router = Router::new().route("/health", get(health_handler));

    let log_router = Router::new()
        .route("/log", post(log_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(forwarder);

    Router::new()
        .merge(health_router)
        .merge(log_router)
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
}

/// Last-resort response for a handler that panicked.
fn internal_error(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    error!("Unhandled error while serving request: {detail}");

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"ok":false,"error":"Internal Server Error"}"#))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::ConsoleSink;
    use crate::test_support::SharedBuffer;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let forwarder = Arc::new(LogForwarder::new(
            None,
            ConsoleSink::with_writer(SharedBuffer::default()),
        ));
        let server = TestServer::new(main_router(forwarder)).unwrap();

        let body = json!({
            "stack": "s", "level": "l", "pkg": "p",
            "message": "x".repeat(BODY_LIMIT_BYTES + 1)
        });
        let response = server.post("/log").json(&body).expect_failure().await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    async fn exploding_handler() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_server_error() {
        let app: Router = Router::new()
            .route("/boom", get(exploding_handler))
            .layer(CatchPanicLayer::custom(internal_error));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/boom").expect_failure().await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({"ok": false, "error": "Internal Server Error"}));
    }
}
