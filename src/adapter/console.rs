//! Console fallback: prints records as marked JSON lines when no backend is
//! available.

use crate::domain::LogPayload;
use std::io::{self, Write};
use std::sync::Mutex;

/// Prefix of every fallback line.
const FALLBACK_MARKER: &str = "[affordmed-log-fallback]";

/// Line-oriented sink for fallback records.
///
/// Writes are serialized so concurrent requests never interleave lines.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Sink writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    /// Write `[marker] <json>` followed by a newline.
    pub fn emit(&self, payload: &LogPayload) -> io::Result<()> {
        let line = payload.to_json_line().map_err(io::Error::other)?;
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "{FALLBACK_MARKER} {line}")?;
        out.flush()
    }
}
