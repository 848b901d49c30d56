//! Per-binding configuration with environment resolution.
//!
//! Each registry is bound to one upstream API through a [`BindingConfig`].
//! Resolution precedence for every option is: explicit builder argument,
//! then binding-specific environment variable (`<PREFIX>_API_URL`,
//! `<PREFIX>_TOKEN`), then generic environment variable (`API_BASE_URL`,
//! `API_TOKEN`, `HTTP_TIMEOUT_SECONDS`, `VERIFY_TLS`), then compiled-in
//! default. A missing base URL is fatal.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;
use zeroize::Zeroize;

/// Default total per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Per-attempt connect timeout in seconds
pub const CONNECT_TIMEOUT_SECONDS: u64 = 10;

/// Default auth header name
pub const DEFAULT_AUTH_HEADER_NAME: &str = "Authorization";

/// Default auth header format; `{token}` is substituted with the credential
pub const DEFAULT_AUTH_HEADER_FORMAT: &str = "Bearer {token}";

/// Opaque credential with automatic memory clearing on drop.
///
/// The token never appears in `Debug` output or logs.
#[derive(Clone)]
pub struct SecretToken {
    value: String,
}

impl SecretToken {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the credential value (limited access)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretToken(***)")
    }
}

impl Drop for SecretToken {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Resolved configuration for one upstream API binding.
///
/// Immutable once resolved; shared by every tool in the registry.
#[derive(Debug, Clone)]
pub struct BindingConfig {
    /// Upstream API root without trailing slash
    base_url: String,
    /// Optional credential injected into the auth header
    auth_token: Option<SecretToken>,
    /// Header carrying the credential
    auth_header_name: String,
    /// Template applied with `{token}` substituted
    auth_header_format: String,
    /// Total per-request timeout
    timeout: Duration,
    /// Whether upstream TLS certificates are verified
    verify_tls: bool,
}

impl BindingConfig {
    /// Start building a configuration for the given environment prefix
    pub fn builder<S: Into<String>>(env_prefix: S) -> BindingConfigBuilder {
        BindingConfigBuilder::new(env_prefix)
    }

    /// Upstream API root, guaranteed to have no trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The auth header as a `(name, value)` pair, when a token is configured
    pub fn auth_header(&self) -> Option<(String, String)> {
        self.auth_token.as_ref().map(|token| {
            (
                self.auth_header_name.clone(),
                self.auth_header_format
                    .replace("{token}", token.expose_secret()),
            )
        })
    }

    /// Total per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether upstream TLS certificates are verified
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }
}

/// Builder for [`BindingConfig`] with environment fallback
#[derive(Debug, Default)]
pub struct BindingConfigBuilder {
    env_prefix: String,
    base_url: Option<String>,
    auth_token: Option<String>,
    auth_header_name: Option<String>,
    auth_header_format: Option<String>,
    timeout_seconds: Option<u64>,
    verify_tls: Option<bool>,
}

impl BindingConfigBuilder {
    pub fn new<S: Into<String>>(env_prefix: S) -> Self {
        Self {
            env_prefix: env_prefix.into(),
            ..Self::default()
        }
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn auth_token<S: Into<String>>(mut self, token: S) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn auth_header_name<S: Into<String>>(mut self, name: S) -> Self {
        self.auth_header_name = Some(name.into());
        self
    }

    pub fn auth_header_format<S: Into<String>>(mut self, format: S) -> Self {
        self.auth_header_format = Some(format.into());
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Resolve against the process environment
    pub fn resolve(self) -> Result<BindingConfig> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with an injected environment lookup.
    ///
    /// Tests use this to avoid mutating process state.
    pub fn resolve_with<F>(self, lookup: F) -> Result<BindingConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = self.env_prefix.clone();
        let from_env = |specific: &str, generic: &str| {
            lookup(&format!("{prefix}_{specific}")).or_else(|| lookup(generic))
        };

        let base_url = self
            .base_url
            .or_else(|| from_env("API_URL", "API_BASE_URL"))
            .ok_or_else(|| {
                Error::config(format!(
                    "missing base URL: set {prefix}_API_URL or API_BASE_URL"
                ))
            })?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{base_url}': {e}")))?;

        let auth_token = self
            .auth_token
            .or_else(|| from_env("TOKEN", "API_TOKEN"))
            .map(SecretToken::new);

        let timeout_seconds = match self.timeout_seconds {
            Some(seconds) => seconds,
            None => match lookup("HTTP_TIMEOUT_SECONDS") {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    Error::config(format!("invalid HTTP_TIMEOUT_SECONDS value: '{raw}'"))
                })?,
                None => DEFAULT_TIMEOUT_SECONDS,
            },
        };
        if timeout_seconds == 0 {
            return Err(Error::config("timeout must be greater than zero"));
        }

        let verify_tls = match self.verify_tls {
            Some(verify) => verify,
            None => match lookup("VERIFY_TLS") {
                Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(Error::config(format!("invalid VERIFY_TLS value: '{raw}'")));
                    }
                },
                None => true,
            },
        };

        Ok(BindingConfig {
            base_url,
            auth_token,
            auth_header_name: self
                .auth_header_name
                .unwrap_or_else(|| DEFAULT_AUTH_HEADER_NAME.to_string()),
            auth_header_format: self
                .auth_header_format
                .unwrap_or_else(|| DEFAULT_AUTH_HEADER_FORMAT.to_string()),
            timeout: Duration::from_secs(timeout_seconds),
            verify_tls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_explicit_base_url_wins_over_env() {
        let vars = env(&[("PETSTORE_API_URL", "https://env.example.com")]);
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://explicit.example.com")
            .resolve_with(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.base_url(), "https://explicit.example.com");
    }

    #[test]
    fn test_specific_env_wins_over_generic() {
        let vars = env(&[
            ("PETSTORE_API_URL", "https://specific.example.com"),
            ("API_BASE_URL", "https://generic.example.com"),
        ]);
        let config = BindingConfig::builder("PETSTORE")
            .resolve_with(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.base_url(), "https://specific.example.com");
    }

    #[test]
    fn test_generic_env_fallback() {
        let vars = env(&[("API_BASE_URL", "https://generic.example.com")]);
        let config = BindingConfig::builder("PETSTORE")
            .resolve_with(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.base_url(), "https://generic.example.com");
    }

    #[test]
    fn test_missing_base_url_is_fatal() {
        let result = BindingConfig::builder("PETSTORE").resolve_with(|_| None);
        assert!(matches!(result, Err(Error::Config(_))));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("PETSTORE_API_URL"));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com/")
            .resolve_with(|_| None)
            .unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = BindingConfig::builder("PETSTORE")
            .base_url("not a url")
            .resolve_with(|_| None);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_auth_header_formatting() {
        let config = BindingConfig::builder("SPLUNK")
            .base_url("https://api.signalfx.com")
            .auth_token("abc123")
            .auth_header_name("X-SF-Token")
            .auth_header_format("{token}")
            .resolve_with(|_| None)
            .unwrap();
        assert_eq!(
            config.auth_header(),
            Some(("X-SF-Token".to_string(), "abc123".to_string()))
        );
    }

    #[test]
    fn test_default_auth_header_is_bearer() {
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com")
            .auth_token("abc123")
            .resolve_with(|_| None)
            .unwrap();
        assert_eq!(
            config.auth_header(),
            Some(("Authorization".to_string(), "Bearer abc123".to_string()))
        );
    }

    #[test]
    fn test_no_token_means_no_auth_header() {
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com")
            .resolve_with(|_| None)
            .unwrap();
        assert!(config.auth_header().is_none());
    }

    #[test]
    fn test_timeout_from_env() {
        let vars = env(&[("HTTP_TIMEOUT_SECONDS", "5")]);
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com")
            .resolve_with(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_default() {
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com")
            .resolve_with(|_| None)
            .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let vars = env(&[("HTTP_TIMEOUT_SECONDS", "soon")]);
        let result = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com")
            .resolve_with(|name| vars.get(name).cloned());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_verify_tls_from_env() {
        let vars = env(&[("VERIFY_TLS", "false")]);
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com")
            .resolve_with(|name| vars.get(name).cloned())
            .unwrap();
        assert!(!config.verify_tls());
    }

    #[test]
    fn test_verify_tls_defaults_to_true() {
        let config = BindingConfig::builder("PETSTORE")
            .base_url("https://api.example.com")
            .resolve_with(|_| None)
            .unwrap();
        assert!(config.verify_tls());
    }

    #[test]
    fn test_secret_token_debug_is_redacted() {
        let token = SecretToken::new("super-secret");
        assert_eq!(format!("{:?}", token), "SecretToken(***)");
    }
}
