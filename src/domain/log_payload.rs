use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// A single structured log record, normalized for forwarding.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LogPayload {
    pub stack: String,
    pub level: String,
    pub pkg: String,
    pub message: String,
    #[serde(default = "empty_meta")]
    pub meta: Value,
}

fn empty_meta() -> Value {
    Value::Object(Map::new())
}

impl LogPayload {
    pub fn new(
        stack: impl Into<String>,
        level: impl Into<String>,
        pkg: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stack: stack.into(),
            level: level.into(),
            pkg: pkg.into(),
            message: message.into(),
            meta: empty_meta(),
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }

    /// Parse a raw request body into a payload.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| PayloadError::NotJson)?;
        Self::from_body(&value)
    }

    /// Validate a decoded request body and coerce it into a payload.
    ///
    /// The four required fields must be truthy; they are coerced to strings.
    /// A falsy `meta` becomes an empty object; any other `meta` is kept as is.
    pub fn from_body(body: &Value) -> Result<Self, PayloadError> {
        let object = body.as_object().ok_or(PayloadError::NotAnObject)?;

        let required = |name: &'static str| {
            object
                .get(name)
                .and_then(coerce_to_string)
                .ok_or(PayloadError::MissingField(name))
        };

        let stack = required("stack")?;
        let level = required("level")?;
        let pkg = required("pkg")?;
        let message = required("message")?;

        let meta = match object.get("meta") {
            Some(value) if is_truthy(value) => value.clone(),
            _ => empty_meta(),
        };

        Ok(Self {
            stack,
            level,
            pkg,
            message,
            meta,
        })
    }

    /// Render the payload as a single compact JSON line.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// JSON truthiness as understood by the relay's callers: `null`, `false`,
/// `0` and `""` are falsy, everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_to_string(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
