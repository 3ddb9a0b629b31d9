//! Shared test support utilities
//!
//! Provides a capturing writer for the console sink and a configurable
//! `MockClient` implementing `LogClient`.

use crate::domain::LogPayload;
use crate::error::ClientError;
use crate::port::{LogClient, SendFuture};
use serde_json::Value;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory writer whose contents can be read back after being moved into a sink.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Mock client that records every payload it receives.
pub struct MockClient {
    received: Arc<Mutex<Vec<LogPayload>>>,
    reply: Option<Value>,
    can_send: bool,
    should_fail: AtomicBool,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            reply: None,
            can_send: true,
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn replying(reply: Value) -> Self {
        Self {
            reply: Some(reply),
            ..Self::new()
        }
    }

    pub fn without_send() -> Self {
        Self {
            can_send: false,
            ..Self::new()
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn received(&self) -> Vec<LogPayload> {
        self.received.lock().unwrap().clone()
    }
}

impl LogClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    fn can_send(&self) -> bool {
        self.can_send
    }

    fn send(&self, payload: LogPayload) -> SendFuture<'_> {
        Box::pin(async move {
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(ClientError::Rejected("Mock send failure".to_string()));
            }
            self.received.lock().unwrap().push(payload);
            Ok(self.reply.clone())
        })
    }
}
