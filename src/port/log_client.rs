//! LogClient trait for logging backends.
//!
//! The forwarder only ever talks to a backend through this trait, which lets
//! tests substitute mock clients.

use crate::domain::LogPayload;
use crate::error::ClientError;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Future returned by [`LogClient::send`].
pub type SendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<Value>, ClientError>> + Send + 'a>>;

/// A logging backend selected at startup.
///
/// This trait is dyn-compatible by using boxed futures.
pub trait LogClient: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Whether this client exposes an operation for sending records.
    ///
    /// A client without one is treated exactly like having no client.
    fn can_send(&self) -> bool {
        true
    }

    /// Deliver one record. `Ok(None)` means the backend returned nothing.
    fn send(&self, payload: LogPayload) -> SendFuture<'_>;
}
