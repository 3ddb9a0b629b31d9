use log_relay::error::RelayError;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    log_relay::app::run().await
}
