//! Client for bearer-authenticated text completion endpoints.
//!
//! One [`CompletionClient`] wraps one endpoint/credential/model triple and
//! exposes a single operation: POST a prompt, get the trimmed `text` back.
//!
//! # Example
//! ```no_run
//! use completion_client::{CompletionClient, CompletionConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CompletionClient::new(CompletionConfig::from_env()?)?;
//! let text = client.generate("Write a haiku about Rust.").await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::completion_config::{CompletionConfig, SamplingParams};
pub use config::default_config::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error_handler::{CompletionError, ConfigError, HttpError};
pub use services::completion_service::CompletionClient;
