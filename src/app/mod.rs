pub mod router;
pub mod server;
mod state;
pub mod tracing;

use crate::config::{self, Credentials};
use crate::error::RelayError;

/// Application entry point. Initializes tracing, configuration, and starts the server.
pub async fn run() -> Result<(), RelayError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings = config::get_configuration()?;
    ::tracing::info!(port = settings.port, "Loaded settings");

    let credentials = Credentials::from_env();
    let app_state = state::AppState::from_settings(&settings, &credentials);

    let app = router::main_router(app_state.forwarder);

    server::serve(app, settings.port).await
}
