//! Typed error for the prompt-router crate.

use completion_client::CompletionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Debug, Error)]
pub enum RouterError {
    /// The inbound message lacks a required field (dotted path).
    #[error("[Prompt Router] missing required field: {0}")]
    MissingField(&'static str),

    /// Errors from the completion call, passed through unmodified.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}
