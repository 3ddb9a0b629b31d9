use std::env;
use std::fmt;
use std::fs;

use serde::Serialize;
use tracing::{error, warn};

use crate::error::RelayError;

/// Default port for the relay HTTP server.
pub const DEFAULT_PORT: u16 = 4000;

/// Largest `POST /log` body accepted, in bytes.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Credential variables, in the order they are reported when missing.
const CREDENTIAL_VARS: [&str; 6] = [
    "EMAIL",
    "NAME",
    "ROLLNO",
    "ACCESS_CODE",
    "CLIENT_ID",
    "CLIENT_SECRET",
];

/// Credentials handed to the logging backend at construction time.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub name: String,
    #[serde(rename = "rollNo")]
    pub roll_no: String,
    #[serde(rename = "accessCode")]
    pub access_code: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

impl Credentials {
    /// Read credentials from the process environment. Never fails.
    pub fn from_env() -> Self {
        Self::from_lookup(get_env_or_file)
    }

    /// Build credentials from an arbitrary variable lookup.
    ///
    /// Emits a single warning naming every variable that is absent or empty,
    /// and substitutes an empty string for each of them.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values: [String; 6] = Default::default();
        let mut missing = Vec::new();

        for (slot, name) in values.iter_mut().zip(CREDENTIAL_VARS) {
            match lookup(name).filter(|v| !v.is_empty()) {
                Some(value) => *slot = value,
                None => missing.push(name),
            }
        }

        if !missing.is_empty() {
            warn!("Missing env vars: {}", missing.join(", "));
        }

        let [email, name, roll_no, access_code, client_id, client_secret] = values;
        Self {
            email,
            name,
            roll_no,
            access_code,
            client_id,
            client_secret,
        }
    }

    /// Whether both halves of the client credential pair are present.
    pub fn has_client_pair(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "" } else { "<redacted>" }
        }

        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("roll_no", &self.roll_no)
            .field("access_code", &redact(&self.access_code))
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Relay HTTP server port
    pub port: u16,
    /// Endpoint of the logging backend; `None` means console fallback only
    pub backend_url: Option<String>,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), RelayError> {
        validate_port(self.port)?;
        if let Some(url) = &self.backend_url {
            if url.trim().is_empty() {
                return Err(RelayError::Config("Backend URL cannot be blank".into()));
            }
        }
        Ok(())
    }
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), RelayError> {
    if port == 0 {
        return Err(RelayError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Read a value from environment variable, with support for _FILE suffix (Docker Secrets).
///
/// Returns `None` when neither is set, the variable is not unicode, or the
/// referenced file cannot be read.
fn get_env_or_file(env_name: &str) -> Option<String> {
    let file_env = format!("{env_name}_FILE");
    if let Ok(file_path) = env::var(&file_env) {
        return match fs::read_to_string(&file_path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                error!("Failed to read {file_env} ({file_path}): {e}");
                None
            }
        };
    }

    env::var(env_name).ok()
}

/// Parse the relay port from a raw value, defaulting when absent.
fn parse_port(raw: Option<String>) -> Result<u16, RelayError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) if value.trim().is_empty() => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|e| RelayError::Config(format!("Invalid LOGGER_PORT {value:?}: {e}"))),
    }
}

pub fn get_configuration() -> Result<Settings, RelayError> {
    let port = parse_port(env::var("LOGGER_PORT").ok())?;
    let backend_url = env::var("LOGGER_BACKEND_URL")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let settings = Settings { port, backend_url };
    settings.validate()?;

    Ok(settings)
}
