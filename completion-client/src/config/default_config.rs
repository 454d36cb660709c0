//! Completion config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_API_KEY`      = bearer credential (mandatory)
//! - `LLM_ENDPOINT`     = completion URL (default: [`DEFAULT_ENDPOINT`])
//! - `LLM_MODEL`        = model id (default: [`DEFAULT_MODEL`])
//! - `LLM_TIMEOUT_SECS` = request timeout (u64, default: none)
//!
//! Empty or whitespace-only values are treated as unset. Sampling is not
//! configurable here: `generate` always sends the
//! [`SamplingParams`](crate::SamplingParams) defaults.

use crate::{
    config::completion_config::CompletionConfig,
    error_handler::{Result, must_var, opt_u64, opt_var, validate_http_endpoint},
};

/// Completion URL used when `LLM_ENDPOINT` is not set.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/v1/completions";

/// Model used when `LLM_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

impl CompletionConfig {
    /// Builds the config from the process environment.
    ///
    /// # Errors
    /// See [`CompletionConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`](crate::ConfigError::MissingVar) if `LLM_API_KEY` is unset
    /// - [`ConfigError::InvalidFormat`](crate::ConfigError::InvalidFormat) if `LLM_ENDPOINT` is not http(s)
    /// - [`ConfigError::InvalidNumber`](crate::ConfigError::InvalidNumber) for unparsable numbers
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = must_var(&lookup, "LLM_API_KEY")?;
        let endpoint =
            opt_var(&lookup, "LLM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;
        let model = opt_var(&lookup, "LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            endpoint: endpoint.trim().to_string(),
            api_key: api_key.trim().to_string(),
            model: model.trim().to_string(),
            timeout_secs: opt_u64(&lookup, "LLM_TIMEOUT_SECS")?,
        })
    }
}
