use std::fmt;

use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded verbatim to the completion backend.
///
/// [`CompletionClient::generate`](crate::CompletionClient::generate) always uses
/// [`SamplingParams::default`]; other values go through
/// [`generate_with`](crate::CompletionClient::generate_with). No local bounds are
/// enforced; the backend decides what it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Sampling temperature (controls creativity).
    pub temperature: f32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
}

impl SamplingParams {
    /// Temperature sent by `generate`.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// `top_p` sent by `generate`.
    pub const DEFAULT_TOP_P: f32 = 0.9;
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            top_p: Self::DEFAULT_TOP_P,
        }
    }
}

/// Connection parameters for a completion backend.
///
/// Set once at construction; the client never mutates it.
///
/// # Fields
///
/// - `endpoint`: Full completion URL (e.g. `https://api.groq.com/v1/completions`).
/// - `api_key`: Bearer credential, already resolved by the caller.
/// - `model`: The model identifier (e.g. `"llama3-8b-8192"`).
/// - `timeout_secs`: Optional request timeout; `None` keeps the transport default.
///
/// # Examples
///
/// ```
/// use completion_client::CompletionConfig;
///
/// let cfg = CompletionConfig {
///     endpoint: "https://api.groq.com/v1/completions".to_string(),
///     api_key: "gsk-...".to_string(),
///     model: "llama3-8b-8192".to_string(),
///     timeout_secs: None,
/// };
/// assert!(!format!("{cfg:?}").contains("gsk-"));
/// ```
#[derive(Clone, PartialEq)]
pub struct CompletionConfig {
    /// Completion URL the request is POSTed to.
    pub endpoint: String,

    /// Bearer token sent in the `Authorization` header.
    pub api_key: String,

    /// Model identifier string.
    pub model: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

// Manual impl so the credential never reaches logs.
impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
