pub mod console;
pub mod http;

pub use console::ConsoleSink;
pub use http::HttpLogClient;

use crate::config::{Credentials, Settings};
use crate::port::LogClient;
use std::sync::Arc;
use tracing::{error, info};

/// Build the configured logging backend, once, at startup.
///
/// Returns `None` when no backend is configured or construction fails; the
/// relay then runs on the console fallback alone.
pub fn load_client(settings: &Settings, credentials: &Credentials) -> Option<Arc<dyn LogClient>> {
    let Some(url) = settings.backend_url.as_deref() else {
        info!("No logging backend configured, using console fallback");
        return None;
    };

    match HttpLogClient::new(url, credentials.clone()) {
        Ok(client) => {
            info!(endpoint = %client.endpoint(), "Logging backend ready");
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Logging backend unavailable, using console fallback: {e}");
            None
        }
    }
}
