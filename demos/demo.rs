use std::time::Duration;

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use tokio::time::sleep;
use tracing::info;
use wiretap::{
    ConsoleSink, Exchange, Level, LoggerConfig, RequestLogger, RequestRecord, ResponseRecord,
    TransportError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("starting wiretap demo");

    let config = LoggerConfig {
        enabled: true,
        level: Level::Verbose,
        log_html_body: false,
    };
    let mut logger = RequestLogger::new(config, ConsoleSink);

    // A networking layer would normally hold this listener and report each
    // completed operation; here we fabricate a few exchanges by hand.
    let listener = logger.start_logging().expect("logger is enabled");

    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(header::COOKIE, HeaderValue::from_static("session=s3cr3t"));

    // JSON response: pretty-printed body, redacted Cookie header.
    listener.exchange_completed(Exchange {
        task_id: 1,
        request: Some(RequestRecord {
            url: Some("http://localhost:3000/users".parse()?),
            method: Some(Method::POST),
            headers,
            body: Some(Bytes::from_static(br#"{"name":"ada"}"#)),
        }),
        error: None,
        response: Some(ResponseRecord {
            status: StatusCode::CREATED,
            mime_type: Some("application/json".to_owned()),
        }),
        body: Some(Bytes::from_static(br#"{"id":7,"name":"ada"}"#)),
    });

    // HTML response: body suppressed unless log_html_body is enabled.
    listener.exchange_completed(Exchange {
        task_id: 2,
        request: Some(RequestRecord {
            url: Some("http://localhost:3000/index.html".parse()?),
            method: Some(Method::GET),
            headers: HeaderMap::new(),
            body: None,
        }),
        error: None,
        response: Some(ResponseRecord {
            status: StatusCode::OK,
            mime_type: Some("text/html".to_owned()),
        }),
        body: Some(Bytes::from_static(b"<html><body>hi</body></html>")),
    });

    // Failed operation: rendered on the error path.
    listener.exchange_completed(Exchange {
        task_id: 3,
        request: Some(RequestRecord {
            url: Some("http://localhost:3000/flaky".parse()?),
            method: Some(Method::GET),
            headers: HeaderMap::new(),
            body: None,
        }),
        error: Some(TransportError::new("connection refused")),
        response: None,
        body: None,
    });

    // Let the background tasks drain before shutting down.
    sleep(Duration::from_millis(200)).await;
    logger.end_logging();

    info!("demo finished");
    Ok(())
}
