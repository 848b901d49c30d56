//! The uniform result envelope returned for every invocation.
//!
//! Success or failure, every tool call resolves to a [`ResponseEnvelope`];
//! nothing in the dispatch path panics or raises past it. Failure bodies
//! always carry a non-empty `error` string, and carry a `status` member
//! only when an upstream HTTP response actually exists.

use serde::Serialize;
use serde_json::{Value, json};

/// Maximum bytes of a non-JSON upstream body kept in the error report
const RAW_EXCERPT_LIMIT: usize = 512;

/// Uniform `{ok, status, body}` result for one invocation
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    /// True when the upstream returned 2xx with a parseable body
    pub ok: bool,
    /// HTTP status code; 0 when no response was received
    pub status: u16,
    /// Parsed JSON on success, `{error, status?, details?}` on failure
    pub body: Value,
}

impl ResponseEnvelope {
    /// Successful upstream response with its parsed JSON body verbatim
    pub fn success(status: u16, body: Value) -> Self {
        Self {
            ok: true,
            status,
            body,
        }
    }

    /// Argument or body-path validation failure; no HTTP call was issued
    pub fn validation_error<S: Into<String>>(message: S) -> Self {
        Self {
            ok: false,
            status: 0,
            body: json!({ "error": message.into() }),
        }
    }

    /// Network-level failure (DNS, connect, TLS, timeout)
    pub fn network_error<S: std::fmt::Display>(class: &str, message: S) -> Self {
        Self {
            ok: false,
            status: 0,
            body: json!({ "error": format!("{class}: {message}") }),
        }
    }

    /// The surrounding task was cancelled and the request aborted
    pub fn cancelled() -> Self {
        Self {
            ok: false,
            status: 0,
            body: json!({ "error": "cancelled" }),
        }
    }

    /// Upstream responded with a non-2xx status.
    ///
    /// The error message is the upstream `error`/`message` text when the
    /// body is JSON and carries one, else `HTTP <status>`; the parsed body
    /// is preserved under `details`.
    pub fn upstream_error(status: u16, details: Option<Value>) -> Self {
        let message = details
            .as_ref()
            .and_then(|body| {
                body.get("error")
                    .or_else(|| body.get("message"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));
        let mut body = json!({ "error": message, "status": status });
        if let Some(details) = details {
            body["details"] = details;
        }
        Self {
            ok: false,
            status,
            body,
        }
    }

    /// 2xx response whose body was not valid JSON
    pub fn decode_error(status: u16, raw: &str) -> Self {
        Self {
            ok: false,
            status,
            body: json!({
                "error": "invalid JSON from upstream",
                "status": status,
                "raw_excerpt": truncate_excerpt(raw),
            }),
        }
    }

    /// The failure message, when this envelope is a failure
    pub fn error_message(&self) -> Option<&str> {
        if self.ok {
            None
        } else {
            self.body.get("error").and_then(Value::as_str)
        }
    }
}

/// Truncate an upstream body on a char boundary for error reporting
fn truncate_excerpt(raw: &str) -> &str {
    if raw.len() <= RAW_EXCERPT_LIMIT {
        return raw;
    }
    let mut end = RAW_EXCERPT_LIMIT;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_keeps_body_verbatim() {
        let envelope = ResponseEnvelope::success(200, json!({"id": 42}));
        assert!(envelope.ok);
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.body, json!({"id": 42}));
    }

    #[test]
    fn test_upstream_error_uses_body_error_text() {
        let envelope = ResponseEnvelope::upstream_error(404, Some(json!({"error": "not found"})));
        assert!(!envelope.ok);
        assert_eq!(envelope.status, 404);
        assert_eq!(
            envelope.body,
            json!({"error": "not found", "status": 404, "details": {"error": "not found"}})
        );
    }

    #[test]
    fn test_upstream_error_falls_back_to_message_field() {
        let envelope =
            ResponseEnvelope::upstream_error(503, Some(json!({"message": "overloaded"})));
        assert_eq!(envelope.error_message(), Some("overloaded"));
    }

    #[test]
    fn test_upstream_error_without_json_body() {
        let envelope = ResponseEnvelope::upstream_error(502, None);
        assert_eq!(envelope.body, json!({"error": "HTTP 502", "status": 502}));
    }

    #[test]
    fn test_network_error_has_status_zero_and_no_body_status() {
        let envelope = ResponseEnvelope::network_error("timeout", "deadline elapsed");
        assert_eq!(envelope.status, 0);
        assert_eq!(envelope.body, json!({"error": "timeout: deadline elapsed"}));
    }

    #[test]
    fn test_cancelled_shape() {
        let envelope = ResponseEnvelope::cancelled();
        assert!(!envelope.ok);
        assert_eq!(envelope.status, 0);
        assert_eq!(envelope.body, json!({"error": "cancelled"}));
    }

    #[test]
    fn test_decode_error_truncates_excerpt() {
        let raw = "x".repeat(2000);
        let envelope = ResponseEnvelope::decode_error(200, &raw);
        assert!(!envelope.ok);
        let excerpt = envelope.body["raw_excerpt"].as_str().unwrap();
        assert_eq!(excerpt.len(), 512);
        assert_eq!(envelope.body["error"], "invalid JSON from upstream");
    }

    #[test]
    fn test_failure_always_has_error_message() {
        for envelope in [
            ResponseEnvelope::validation_error("unknown argument: x"),
            ResponseEnvelope::network_error("connect", "refused"),
            ResponseEnvelope::cancelled(),
            ResponseEnvelope::upstream_error(500, None),
            ResponseEnvelope::decode_error(200, "<html>"),
        ] {
            assert!(!envelope.ok);
            assert!(!envelope.error_message().unwrap().is_empty());
        }
    }
}
