//! Composition of one exchange into its final log string.

use crate::level::Level;
use crate::render::render_body;
use crate::types::{Exchange, RequestRecord, ResponseRecord};

const HTML_MIME: &str = "text/html";

/// Render one completed exchange at the given verbosity level.
///
/// Deterministic and total: absent fields degrade to empty text, and no
/// input combination panics. Returns `None` when the level's template emits
/// nothing for this exchange: the error template without an error present,
/// or a malformed exchange carrying neither error nor response.
pub fn format_exchange(exchange: &Exchange, level: Level, log_html_body: bool) -> Option<String> {
    if exchange.is_malformed() {
        return None;
    }
    match level {
        Level::Error => error_template(exchange),
        Level::Debug => Some(debug_template(exchange)),
        Level::Verbose => Some(verbose_template(exchange, log_html_body)),
    }
}

fn summary(exchange: &Exchange) -> String {
    exchange
        .request
        .as_ref()
        .map(RequestRecord::summary)
        .unwrap_or_default()
}

fn status_line(response: &ResponseRecord) -> String {
    format!("\nstatusCode : {}", response.status.as_u16())
}

fn mime_line(response: &ResponseRecord) -> String {
    format!(
        "\nmimeType : {}",
        response.mime_type.as_deref().unwrap_or_default()
    )
}

/// Failed exchanges only; a successful exchange produces no output at the
/// error level.
fn error_template(exchange: &Exchange) -> Option<String> {
    let error = exchange.error.as_ref()?;

    let mut out = format!("Request {}: \n{}\n", exchange.task_id, summary(exchange));
    out.push_str(&format!("\nResponse ERROR : {error}"));

    if let Some(response) = &exchange.response {
        out.push_str(&status_line(response));
        out.push_str(&mime_line(response));
    }

    Some(out)
}

fn debug_template(exchange: &Exchange) -> String {
    let mut out = format!("Request {}: \n{}\n", exchange.task_id, summary(exchange));

    if let Some(error) = &exchange.error {
        out.push_str(&format!("\nResponse ERROR : {error}"));
        if let Some(response) = &exchange.response {
            out.push_str(&status_line(response));
        }
    } else if let Some(response) = &exchange.response {
        out.push_str("\nResponse :");
        out.push_str(&status_line(response));
        out.push_str(&mime_line(response));
    }

    out
}

fn verbose_template(exchange: &Exchange, log_html_body: bool) -> String {
    let curl = exchange
        .request
        .as_ref()
        .map(RequestRecord::curl_command)
        .unwrap_or_default();

    let mut out = format!("Request {} : \n{}\n", exchange.task_id, summary(exchange));
    out.push_str(&format!("\n{curl}\n"));

    if let Some(error) = &exchange.error {
        out.push_str(&format!("\nResponse ERROR : {error}"));
        if let Some(response) = &exchange.response {
            out.push_str(&status_line(response));
        }
        return out;
    }

    if let Some(response) = &exchange.response {
        out.push_str("\nResponse :");
        out.push_str(&status_line(response));
        out.push_str(&mime_line(response));

        if response.mime_type.as_deref() == Some(HTML_MIME) && !log_html_body {
            out.push_str("\nData : HTML (suppressed; enable HTML body logging to print)");
            return out;
        }
    }

    if let Some(body) = &exchange.body {
        out.push_str("\nData :\n");
        out.push_str(&render_body(body));
    }

    out
}
