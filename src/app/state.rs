use crate::adapter::{self, ConsoleSink};
use crate::config::{Credentials, Settings};
use crate::forwarder::LogForwarder;
use std::sync::Arc;

/// Shared application state holding the forwarder.
pub struct AppState {
    pub forwarder: Arc<LogForwarder>,
}

impl AppState {
    /// Create `AppState` from configuration settings and credentials.
    ///
    /// Backend construction happens here, exactly once; failure leaves the
    /// forwarder on the console fallback.
    #[must_use]
    pub fn from_settings(settings: &Settings, credentials: &Credentials) -> Self {
        let client = adapter::load_client(settings, credentials);
        let forwarder = Arc::new(LogForwarder::new(client, ConsoleSink::stdout()));

        Self { forwarder }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_without_backend_uses_fallback() {
        let settings = Settings {
            port: 4000,
            backend_url: None,
        };
        let state = AppState::from_settings(&settings, &Credentials::default());
        assert!(state.forwarder.uses_fallback());
    }

    #[test]
    fn test_from_settings_with_backend() {
        let settings = Settings {
            port: 4000,
            backend_url: Some("https://logs.example.com/ingest".into()),
        };
        let state = AppState::from_settings(&settings, &Credentials::default());
        assert!(!state.forwarder.uses_fallback());
    }
}
