use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Failure reported by a logging backend while handling a single record.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend returned a non-JSON response: {0}")]
    Decode(String),

    #[error("{0}")]
    Rejected(String),
}

/// Reasons a `POST /log` body does not describe a log record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("body is not valid JSON")]
    NotJson,

    #[error("body is not a JSON object")]
    NotAnObject,

    #[error("missing or empty field `{0}`")]
    MissingField(&'static str),
}
