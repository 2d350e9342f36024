//! Sink abstraction for formatted log output.

/// Destination for fully formatted log messages.
///
/// `write` is assumed synchronous and non-failing. The logger calls it from
/// a dedicated background task, so a slow sink delays only that task and
/// never the networking layer being observed.
pub trait LogSink: Send + Sync + 'static {
    /// Write one complete, already formatted log message.
    fn write(&self, message: &str);
}

/// Reference sink that prints each message to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create a console sink.
    pub const fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn write(&self, message: &str) {
        println!("{message}");
    }
}
