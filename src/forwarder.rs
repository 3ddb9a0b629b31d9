//! Relays log records to the backend selected at startup, or to the console
//! when there is none.

use crate::adapter::ConsoleSink;
use crate::domain::{ForwardResult, LogPayload, is_truthy};
use crate::error::ClientError;
use crate::port::LogClient;
use std::sync::Arc;
use tracing::{error, instrument};

enum Route {
    Console,
    Client(Arc<dyn LogClient>),
}

/// Immutable forwarding service shared by all requests.
pub struct LogForwarder {
    route: Route,
    console: ConsoleSink,
}

impl LogForwarder {
    /// Pick the forwarding route once. A client that cannot send is dropped
    /// in favour of the console.
    pub fn new(client: Option<Arc<dyn LogClient>>, console: ConsoleSink) -> Self {
        let route = match client {
            None => Route::Console,
            Some(client) if !client.can_send() => {
                error!(
                    client = client.name(),
                    "Logging client has no send operation. Falling back."
                );
                Route::Console
            }
            Some(client) => Route::Client(client),
        };

        Self { route, console }
    }

    /// Forwarder that only ever prints to standard output.
    pub fn console_only() -> Self {
        Self::new(None, ConsoleSink::stdout())
    }

    pub fn uses_fallback(&self) -> bool {
        matches!(self.route, Route::Console)
    }

    /// Forward one record.
    ///
    /// Falling back to the console always succeeds. Errors from a real
    /// backend are returned unchanged.
    #[instrument(skip_all, fields(stack = %payload.stack, level = %payload.level, pkg = %payload.pkg))]
    pub async fn forward(&self, payload: LogPayload) -> Result<ForwardResult, ClientError> {
        let client = match &self.route {
            Route::Console => return Ok(self.fallback(&payload)),
            Route::Client(client) => client,
        };

        let reply = client.send(payload).await?;
        Ok(match reply {
            Some(value) if is_truthy(&value) => ForwardResult::Backend(value),
            _ => ForwardResult::Delivered,
        })
    }

    fn fallback(&self, payload: &LogPayload) -> ForwardResult {
        if let Err(e) = self.console.emit(payload) {
            error!("Failed to write fallback record: {e}");
        }
        ForwardResult::Fallback
    }
}
