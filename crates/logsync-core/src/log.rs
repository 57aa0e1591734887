//! Append-only logging sink

/// Best-effort message sink shown to the user as an output log.
///
/// Implementations must never panic; a sink that cannot write drops the message.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);
    fn error(&self, message: &str, detail: Option<&str>);
}

/// Sink that forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str) {
        tracing::info!(target: "logsync", "{message}");
    }

    fn error(&self, message: &str, detail: Option<&str>) {
        match detail {
            Some(detail) => tracing::error!(target: "logsync", detail, "{message}"),
            None => tracing::error!(target: "logsync", "{message}"),
        }
    }
}
