//! Composite sink for fanning output out to multiple destinations.
//!
//! [`MultiSink`] composes an arbitrary number of [`LogSink`] implementations
//! behind a single sink, writing each message to every inner sink in
//! registration order.
//!
//! # Example
//!
//! ```rust
//! use wiretap::{ConsoleSink, MultiSink};
//!
//! let sink = MultiSink::new().with(ConsoleSink);
//!
//! // Use anywhere a LogSink is expected:
//! // let logger = RequestLogger::new(config, sink);
//! ```

use std::sync::Arc;

use crate::sink::LogSink;

/// A sink that forwards each message to every registered inner sink.
///
/// Writes occur sequentially in registration order, so relative ordering of
/// messages is preserved per sink.
pub struct MultiSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl MultiSink {
    /// Create a new empty MultiSink.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink to the chain. Returns self for builder pattern.
    pub fn with<S: LogSink>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Returns true if no sinks have been added.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Returns the number of sinks in the chain.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for MultiSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MultiSink {
    fn write(&self, message: &str) {
        for sink in &self.sinks {
            sink.write(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingSink {
        count: Arc<AtomicUsize>,
    }

    impl LogSink for CountingSink {
        fn write(&self, _message: &str) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct RecordingSink {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl LogSink for RecordingSink {
        fn write(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_owned());
        }
    }

    #[test]
    fn empty_multi_sink_accepts_writes() {
        let sink = MultiSink::new();
        assert!(sink.is_empty());
        assert_eq!(sink.len(), 0);

        // Should not panic with no sinks
        sink.write("message");
    }

    #[test]
    fn every_registered_sink_receives_each_message() {
        let count1 = Arc::new(AtomicUsize::new(0));
        let count2 = Arc::new(AtomicUsize::new(0));

        let sink = MultiSink::new()
            .with(CountingSink {
                count: count1.clone(),
            })
            .with(CountingSink {
                count: count2.clone(),
            });
        assert_eq!(sink.len(), 2);

        sink.write("one");
        sink.write("two");

        assert_eq!(count1.load(Ordering::SeqCst), 2);
        assert_eq!(count2.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn messages_arrive_unmodified_and_in_order() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = MultiSink::new().with(RecordingSink {
            messages: messages.clone(),
        });

        sink.write("first");
        sink.write("second");

        assert_eq!(*messages.lock().unwrap(), vec!["first", "second"]);
    }
}
