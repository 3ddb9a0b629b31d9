use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Outcome of forwarding one record.
#[derive(Clone, Debug, PartialEq)]
pub enum ForwardResult {
    /// No usable backend; the record was printed locally.
    Fallback,
    /// The backend accepted the record without returning anything of note.
    Delivered,
    /// The backend's own reply, passed through untouched.
    Backend(Value),
}

impl ForwardResult {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl Serialize for ForwardResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fallback => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("fallback", &true)?;
                map.end()
            }
            Self::Delivered => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("ok", &true)?;
                map.end()
            }
            Self::Backend(value) => value.serialize(serializer),
        }
    }
}
