//! Unified error handling for `completion-client`.
//!
//! This module exposes a single top-level error type [`CompletionError`] for the
//! whole library, and groups configuration errors in a nested enum
//! ([`ConfigError`]). Small helpers for reading/validating configuration values
//! are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the prefix `[Completion Client]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Maximum number of characters of an upstream body rendered in messages.
const SNIPPET_CHARS: usize = 240;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `completion-client` crate.
///
/// None of these are retried or recovered locally; callers receive them as-is.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream returned a non-successful HTTP status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Upstream answered 2xx but the body is not a JSON object of the expected shape.
    #[error("[Completion Client] malformed response: {0}")]
    MalformedResponse(String),

    /// Underlying HTTP transport error (connect, TLS, configured timeout).
    #[error("[Completion Client] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

impl CompletionError {
    /// Returns `true` when the transport gave up because of the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CompletionError::HttpTransport(e) if e.is_timeout())
    }
}

/// Non-2xx answer from the completion backend.
///
/// Carries the full response body; `Display` only renders a short snippet.
#[derive(Debug, Error)]
#[error("[Completion Client] HTTP {status} from {url}: {}", make_snippet(.body))]
pub struct HttpError {
    /// HTTP status code returned by upstream.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Raw response body (may be empty if it could not be read).
    pub body: String,
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable is missing or empty.
    #[error("[Completion Client] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (e.g. the timeout).
    #[error("[Completion Client] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Completion Client] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable or field name (e.g., `LLM_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// The credential cannot be sent as an HTTP header value.
    #[error("[Completion Client] credential is not a valid header value")]
    InvalidCredential,
}

/* ------------------------------------------------------------------------- */
/* Lookup helpers (return unified `Result<T>`)                               */
/* ------------------------------------------------------------------------- */

/// Reads `name` through `lookup`, treating empty/whitespace values as unset.
pub fn opt_var<F>(lookup: &F, name: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

/// Fetches a required, non-empty variable.
///
/// # Errors
/// Returns [`CompletionError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_var<F>(lookup: &F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    opt_var(lookup, name).ok_or_else(|| ConfigError::MissingVar(name).into())
}

/// Parses an optional `u64` (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn opt_u64<F>(lookup: &F, name: &'static str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match opt_var(lookup, name) {
        Some(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            CompletionError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string is empty or does not
/// start with a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Shortens an upstream body for logs and error messages.
pub fn make_snippet(text: &str) -> String {
    let trimmed = text.trim();
    let mut snippet: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    if trimmed.chars().count() > SNIPPET_CHARS {
        snippet.push('…');
    }
    snippet
}
