pub mod log_client;

pub use log_client::{LogClient, SendFuture};
