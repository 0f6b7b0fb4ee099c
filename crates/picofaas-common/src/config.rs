//! Base-URL configuration for picofaas clients.
//!
//! The server address is resolved from, in priority order: an explicit
//! value (e.g. a CLI flag), the `BASE_URL` environment variable, and the
//! default of `http://localhost:8000`.

use crate::protocol::error::{FaasError, Result};

/// Default server address when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable consulted when no explicit base URL is given.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Resolves the base URL: explicit value > `BASE_URL` env var > default.
pub fn resolve_base_url(explicit: Option<String>) -> String {
    explicit
        .or_else(|| std::env::var(BASE_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Validates that a base URL starts with http:// or https://.
pub fn validate_base_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(FaasError::InvalidRequest(format!(
            "invalid base URL '{}': must start with http:// or https://",
            url
        )))
    }
}
