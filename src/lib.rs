//! # Wiretap
//!
//! Observes completed HTTP exchanges reported by a client networking stack
//! and renders each one as a human-readable log entry at a configurable
//! verbosity level.
//!
//! The crate performs no network I/O of its own and never mutates the
//! traffic it observes: the networking layer hands over one [`Exchange`]
//! per finished operation, and wiretap formats it and forwards the result
//! to a [`LogSink`]. Formatting is total: a broken payload degrades to raw
//! text or empty output, never to an error the embedding application sees.
//!
//! ## Features
//!
//! - **Three verbosity levels**: failed exchanges only ([`Level::Error`]),
//!   request and status lines ([`Level::Debug`]), or full output with a
//!   replayable `curl` command and the response body ([`Level::Verbose`])
//! - **Credential redaction**: `Cookie` headers never reach the sink
//! - **HTML suppression**: `text/html` bodies are withheld unless
//!   explicitly enabled
//! - **Background processing**: formatting and sink writes happen on
//!   dedicated tasks, never on the reporting thread
//! - **Extensible sinks**: console by default, anything implementing
//!   [`LogSink`], or several at once via [`MultiSink`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use http::StatusCode;
//! use wiretap::{ConsoleSink, Exchange, Level, LoggerConfig, RequestLogger, ResponseRecord};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LoggerConfig {
//!         enabled: true,
//!         level: Level::Verbose,
//!         log_html_body: false,
//!     };
//!     let mut logger = RequestLogger::new(config, ConsoleSink);
//!
//!     // Hand the listener to the networking layer; it reports each
//!     // completed exchange back through it.
//!     let listener = logger.start_logging().expect("logger is enabled");
//!
//!     listener.exchange_completed(Exchange {
//!         task_id: 1,
//!         request: None,
//!         error: None,
//!         response: Some(ResponseRecord {
//!             status: StatusCode::OK,
//!             mime_type: Some("application/json".to_owned()),
//!         }),
//!         body: Some(r#"{"ok":true}"#.into()),
//!     });
//!
//!     logger.end_logging();
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

pub mod format;
pub mod level;
pub mod multi_sink;
pub mod render;
pub mod sink;
pub mod types;

pub use format::format_exchange;
pub use level::Level;
pub use multi_sink::MultiSink;
pub use render::render_body;
pub use sink::{ConsoleSink, LogSink};
pub use types::{Exchange, RequestRecord, ResponseRecord, TransportError};

/// Separator line written around every message for visual delimitation in
/// the sink.
const SEPARATOR: &str = "--------------------------------------------------------";

/// Configuration for the exchange logger.
///
/// Set by the embedding application before calling
/// [`RequestLogger::start_logging`].
///
/// # Examples
///
/// ```rust
/// use wiretap::{Level, LoggerConfig};
///
/// // Default configuration: enabled in debug builds only
/// let config = LoggerConfig::default();
///
/// // Custom configuration
/// let config = LoggerConfig {
///     enabled: true,
///     level: Level::Verbose,
///     log_html_body: true,
/// };
/// ```
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    /// Whether `start_logging` subscribes at all
    pub enabled: bool,
    /// Verbosity template applied to each observed exchange
    pub level: Level,
    /// Print `text/html` response bodies instead of suppressing them
    pub log_html_body: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            // On by default only in development builds.
            enabled: cfg!(debug_assertions),
            level: Level::default(),
            log_html_body: false,
        }
    }
}

/// Settings shared with the observer task and read fresh per exchange, so
/// changes while observing apply to the next notification.
#[derive(Debug)]
struct SharedSettings {
    level: AtomicU8,
    log_html_body: AtomicBool,
}

impl SharedSettings {
    fn new(level: Level, log_html_body: bool) -> Self {
        Self {
            level: AtomicU8::new(level.rank()),
            log_html_body: AtomicBool::new(log_html_body),
        }
    }

    fn level(&self) -> Level {
        Level::from_rank(self.level.load(Ordering::Relaxed))
    }

    fn set_level(&self, level: Level) {
        self.level.store(level.rank(), Ordering::Relaxed);
    }

    fn log_html_body(&self) -> bool {
        self.log_html_body.load(Ordering::Relaxed)
    }

    fn set_log_html_body(&self, log_html_body: bool) {
        self.log_html_body.store(log_html_body, Ordering::Relaxed);
    }
}

/// Handle the networking layer uses to report completed exchanges.
///
/// Returned by [`RequestLogger::start_logging`] and registered with the
/// networking layer by the embedding application; there is no ambient
/// global registry. Cloneable, and reporting is a non-blocking send onto the
/// logger's observer queue. Sends after [`RequestLogger::end_logging`] are
/// silently discarded.
#[derive(Clone, Debug)]
pub struct ExchangeListener {
    tx: mpsc::UnboundedSender<Exchange>,
}

impl ExchangeListener {
    /// Report one completed exchange. Never blocks the caller.
    pub fn exchange_completed(&self, exchange: Exchange) {
        if self.tx.send(exchange).is_err() {
            debug!("exchange reported after logging ended, discarding");
        }
    }
}

/// Observes completed exchanges and forwards formatted log entries to a
/// sink.
///
/// The facade is a two-state machine, stopped and observing.
/// [`start_logging`] always tears down any prior subscription before
/// (re)subscribing, so calling it repeatedly leaves exactly one active
/// subscription. Teardown is the explicit [`end_logging`] call; it is
/// fire-and-forget and never waits for queued sink writes to drain.
///
/// [`start_logging`]: RequestLogger::start_logging
/// [`end_logging`]: RequestLogger::end_logging
pub struct RequestLogger {
    enabled: bool,
    settings: Arc<SharedSettings>,
    sink: Arc<dyn LogSink>,
    observer: Option<JoinHandle<()>>,
}

impl RequestLogger {
    /// Create a logger in the stopped state.
    pub fn new<S: LogSink>(config: LoggerConfig, sink: S) -> Self {
        Self {
            enabled: config.enabled,
            settings: Arc::new(SharedSettings::new(config.level, config.log_html_body)),
            sink: Arc::new(sink),
            observer: None,
        }
    }

    /// Begin observing completed exchanges.
    ///
    /// Any prior subscription is torn down first. Returns the listener the
    /// networking layer reports into, or `None` when the logger is
    /// disabled. Must be called from within a tokio runtime: this spawns
    /// one task that formats exchanges and a second that writes to the
    /// sink, so sink latency never backs up into formatting.
    pub fn start_logging(&mut self) -> Option<ExchangeListener> {
        self.end_logging();
        if !self.enabled {
            return None;
        }

        let (exchange_tx, mut exchange_rx) = mpsc::unbounded_channel::<Exchange>();
        let (sink_tx, mut sink_rx) = mpsc::unbounded_channel::<String>();

        let sink = self.sink.clone();
        tokio::spawn(async move {
            while let Some(message) = sink_rx.recv().await {
                sink.write(&format!("{SEPARATOR}\n{message}\n{SEPARATOR}"));
            }
        });

        let settings = self.settings.clone();
        let observer = tokio::spawn(async move {
            while let Some(exchange) = exchange_rx.recv().await {
                if exchange.is_malformed() {
                    debug!(
                        task_id = exchange.task_id,
                        "dropping exchange with neither error nor response"
                    );
                    continue;
                }

                // Read the template settings fresh for every exchange.
                let level = settings.level();
                let log_html_body = settings.log_html_body();

                if let Some(message) = format_exchange(&exchange, level, log_html_body) {
                    if sink_tx.send(message).is_err() {
                        error!("sink task gone, stopping exchange observer");
                        break;
                    }
                }
            }
        });

        debug!("exchange logging started");
        self.observer = Some(observer);
        Some(ExchangeListener { tx: exchange_tx })
    }

    /// Stop observing completed exchanges.
    ///
    /// Safe to call when already stopped. Queued sink writes are not
    /// awaited; teardown must never block or throttle the networking layer.
    pub fn end_logging(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.abort();
            debug!("exchange logging ended");
        }
    }

    /// Whether a subscription is currently active.
    pub fn is_observing(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Whether `start_logging` will subscribe.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Takes effect at the next [`start_logging`] call.
    ///
    /// [`start_logging`]: RequestLogger::start_logging
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Currently configured verbosity level.
    pub fn level(&self) -> Level {
        self.settings.level()
    }

    /// Takes effect for the next observed exchange, including while
    /// observing.
    pub fn set_level(&self, level: Level) {
        self.settings.set_level(level);
    }

    /// Whether `text/html` response bodies are printed.
    pub fn log_html_body(&self) -> bool {
        self.settings.log_html_body()
    }

    /// Takes effect for the next observed exchange, including while
    /// observing.
    pub fn set_log_html_body(&self, log_html_body: bool) {
        self.settings.set_log_html_body(log_html_body);
    }
}
