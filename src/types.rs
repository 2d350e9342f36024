//! Data types for completed HTTP exchanges.
//!
//! This module contains the core data structures a networking layer uses to
//! describe one finished HTTP operation to the logger: the outgoing request,
//! its terminal outcome (response or error), and the accumulated body bytes.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};

/// One completed HTTP operation together with its terminal outcome.
///
/// Constructed by the networking layer once the operation has finished,
/// consumed exactly once by the formatter, and never mutated. Exactly one of
/// `error` and `response` should be present; an exchange carrying neither is
/// malformed and is silently skipped.
///
/// # Examples
///
/// ```rust
/// use wiretap::{Exchange, ResponseRecord};
/// use http::StatusCode;
///
/// let exchange = Exchange {
///     task_id: 1,
///     request: None,
///     error: None,
///     response: Some(ResponseRecord {
///         status: StatusCode::OK,
///         mime_type: Some("application/json".to_owned()),
///     }),
///     body: None,
/// };
/// assert_eq!(exchange.task_id, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Opaque identifier assigned by the networking layer, used to label the
    /// log entry
    pub task_id: u64,
    /// The outgoing request, if the networking layer still holds it
    pub request: Option<RequestRecord>,
    /// Terminal error of a failed operation
    pub error: Option<TransportError>,
    /// Response metadata of a successful operation
    pub response: Option<ResponseRecord>,
    /// Accumulated response body bytes, if any were captured
    pub body: Option<Bytes>,
}

impl Exchange {
    /// A completed operation either failed or produced a response; an
    /// exchange with neither outcome is malformed and must be skipped.
    pub(crate) fn is_malformed(&self) -> bool {
        self.error.is_none() && self.response.is_none()
    }
}

/// Descriptor of an outgoing HTTP request.
///
/// A record without a URL is considered unusable and renders as empty text,
/// not as an error.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// Absolute request URL
    pub url: Option<Uri>,
    /// HTTP method (GET, POST, etc.)
    pub method: Option<Method>,
    /// Request headers; `Cookie` is redacted from all rendered output
    pub headers: HeaderMap,
    /// Raw request body bytes, if the request carried one
    pub body: Option<Bytes>,
}

/// Response metadata of a completed operation.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: StatusCode,
    /// MIME type reported for the response body, if any
    pub mime_type: Option<String>,
}

/// Terminal error of a failed HTTP operation.
///
/// This is data to be rendered, not a fault of the logger: the networking
/// layer reports it and the formatter prints its message on the error path.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description of the failure
    pub message: String,
}

impl TransportError {
    /// Create an error from any human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
