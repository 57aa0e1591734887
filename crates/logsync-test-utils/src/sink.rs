//! [`RecordingSink`]: a [`LogSink`] that keeps what it is given.

use logsync_core::LogSink;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingSink {
    logs: Mutex<Vec<String>>,
    errors: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap().clone()
    }

    /// Error messages paired with their detail.
    pub fn errors(&self) -> Vec<(String, Option<String>)> {
        self.errors.lock().unwrap().clone()
    }

    /// Whether any log line contains `needle`.
    pub fn logged(&self, needle: &str) -> bool {
        self.logs.lock().unwrap().iter().any(|l| l.contains(needle))
    }
}

impl LogSink for RecordingSink {
    fn log(&self, message: &str) {
        self.logs.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str, detail: Option<&str>) {
        self.errors
            .lock()
            .unwrap()
            .push((message.to_string(), detail.map(str::to_string)));
    }
}
