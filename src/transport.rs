//! HTTP transport: one request out, one normalized envelope back.
//!
//! The reqwest client is built once per registry and shared by every tool;
//! it owns the connection pool, the timeouts, the redirect policy, and the
//! TLS mode. Failures never escape as errors: every outcome is folded into
//! a [`ResponseEnvelope`]. Nothing is retried.

use crate::config::{BindingConfig, CONNECT_TIMEOUT_SECONDS};
use crate::envelope::ResponseEnvelope;
use crate::error::{Error, Result};
use crate::request::{RequestBody, RequestPlan};
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Redirects are followed up to this many hops
const MAX_REDIRECTS: usize = 5;

/// Shared HTTP client bound to one upstream API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the client from the binding configuration
    pub fn new(config: &BindingConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECONDS))
            .redirect(redirect_policy())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ));
        if !config.verify_tls() {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Issue one request and normalize whatever comes back
    pub async fn execute(&self, plan: RequestPlan) -> ResponseEnvelope {
        let mut request = self.client.request(plan.method.into(), plan.url);
        for (name, value) in &plan.headers {
            request = request.header(name, value);
        }
        request = match plan.body {
            Some(RequestBody::Raw(raw)) => request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(raw),
            Some(RequestBody::Json(value)) => request.json(&value),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => return classify_error(&error),
        };
        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => return classify_error(&error),
        };
        normalize(status, &text)
    }
}

/// Follow up to [`MAX_REDIRECTS`] hops, and only within the same scheme
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let same_scheme = attempt
            .previous()
            .first()
            .is_none_or(|origin| origin.scheme() == attempt.url().scheme());
        if same_scheme {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

/// Fold a transport failure into the envelope; class first, then detail
fn classify_error(error: &reqwest::Error) -> ResponseEnvelope {
    let class = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else {
        "request"
    };
    ResponseEnvelope::network_error(class, error)
}

/// Normalize a completed HTTP exchange into the uniform envelope
fn normalize(status: u16, text: &str) -> ResponseEnvelope {
    let parsed: Option<Value> = if text.trim().is_empty() {
        None
    } else {
        serde_json::from_str(text).ok()
    };
    if (200..300).contains(&status) {
        match parsed {
            Some(body) => ResponseEnvelope::success(status, body),
            // Empty 2xx bodies (204, DELETEs) are a success with no payload.
            None if text.trim().is_empty() => ResponseEnvelope::success(status, Value::Null),
            None => ResponseEnvelope::decode_error(status, text),
        }
    } else {
        ResponseEnvelope::upstream_error(status, parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_success() {
        let envelope = normalize(200, r#"{"id": 42}"#);
        assert!(envelope.ok);
        assert_eq!(envelope.body, json!({"id": 42}));
    }

    #[test]
    fn test_normalize_empty_success_body() {
        let envelope = normalize(204, "");
        assert!(envelope.ok);
        assert_eq!(envelope.status, 204);
        assert_eq!(envelope.body, Value::Null);
    }

    #[test]
    fn test_normalize_malformed_success_body() {
        let envelope = normalize(200, "<html>not json</html>");
        assert!(!envelope.ok);
        assert_eq!(envelope.body["error"], "invalid JSON from upstream");
        assert_eq!(envelope.body["raw_excerpt"], "<html>not json</html>");
    }

    #[test]
    fn test_normalize_upstream_error_with_json_body() {
        let envelope = normalize(404, r#"{"error": "not found"}"#);
        assert!(!envelope.ok);
        assert_eq!(envelope.status, 404);
        assert_eq!(envelope.body["error"], "not found");
        assert_eq!(envelope.body["details"], json!({"error": "not found"}));
    }

    #[test]
    fn test_normalize_upstream_error_with_plain_body() {
        let envelope = normalize(500, "Internal Server Error");
        assert_eq!(envelope.body["error"], "HTTP 500");
        assert!(envelope.body.get("details").is_none());
    }

    #[test]
    fn test_rate_limit_propagates_unchanged() {
        // 429 is surfaced like any other upstream error; callers own
        // throttling policy.
        let envelope = normalize(429, r#"{"error": "rate limited"}"#);
        assert_eq!(envelope.status, 429);
        assert_eq!(envelope.body["error"], "rate limited");
    }
}
