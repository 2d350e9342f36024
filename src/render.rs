//! Rendering of raw bodies and request descriptors into display text.

use serde_json::Value;

use crate::types::RequestRecord;

/// Continuation that joins curl tokens so the command prints as a valid
/// multi-line shell invocation.
const CURL_CONTINUATION: &str = " \\\n\t";

/// Convert a raw payload into display text.
///
/// JSON payloads are re-serialized with stable, human-readable indentation.
/// Anything else is returned verbatim when it decodes as UTF-8, and as an
/// empty string otherwise. Total: never fails, never panics.
pub fn render_body(bytes: &[u8]) -> String {
    if let Ok(document) = serde_json::from_slice::<Value>(bytes) {
        if let Ok(pretty) = serde_json::to_string_pretty(&document) {
            return pretty;
        }
    }
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .unwrap_or_default()
}

impl RequestRecord {
    /// Multi-line summary of the request: URL, method, headers, and body.
    ///
    /// The `Cookie` header is excluded so session credentials never reach the
    /// sink. Header values that are not valid UTF-8 are skipped, and the body
    /// line only appears when the body decodes as UTF-8. A record without a
    /// URL renders as an empty string.
    pub fn summary(&self) -> String {
        let Some(url) = &self.url else {
            return String::new();
        };

        let mut lines = vec![format!("URL : {url}")];

        if let Some(method) = &self.method {
            lines.push(format!("httpMethod : {method}"));
        }

        for (name, value) in &self.headers {
            if *name == http::header::COOKIE {
                continue;
            }
            if let Ok(value) = value.to_str() {
                lines.push(format!("HTTPHeader : {name}: {value}"));
            }
        }

        if let Some(body) = self.utf8_body() {
            lines.push(format!("httpBody: {body}"));
        }

        lines.join("\n")
    }

    /// Equivalent `curl` invocation for replaying the request.
    ///
    /// Follows the same redaction and degradation rules as [`summary`]:
    /// no `Cookie` header, UTF-8 bodies only, empty string without a URL.
    ///
    /// [`summary`]: RequestRecord::summary
    pub fn curl_command(&self) -> String {
        let Some(url) = &self.url else {
            return String::new();
        };

        let mut base = format!("curl {url}");
        if self.method == Some(http::Method::HEAD) {
            base.push_str(" --head");
        }

        let mut tokens = vec![base];

        if let Some(method) = &self.method {
            if *method != http::Method::GET && *method != http::Method::HEAD {
                tokens.push(format!("-X {method}"));
            }
        }

        for (name, value) in &self.headers {
            if *name == http::header::COOKIE {
                continue;
            }
            if let Ok(value) = value.to_str() {
                tokens.push(format!("-H '{name}: {value}'"));
            }
        }

        if let Some(body) = self.utf8_body() {
            tokens.push(format!("-d '{body}'"));
        }

        tokens.join(CURL_CONTINUATION)
    }

    fn utf8_body(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|body| std::str::from_utf8(body).ok())
    }
}
