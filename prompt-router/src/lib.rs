//! Persona-aware prompt routing in front of a completion backend.
//!
//! Public API: [`PromptRouter::handle`]. It validates the inbound message,
//! looks up the persona in the [`RoleTable`], builds the combined prompt,
//! calls the [`CompletionClient`], and wraps the text in a [`ResponseEnvelope`].

mod api_types;
mod error;
mod prompt;
mod roles;

use std::sync::Arc;

use completion_client::CompletionClient;
use tracing::{debug, instrument};

pub use api_types::{InboundMessage, MessageData, PromptRequest, ResponseEnvelope};
pub use error::{Result, RouterError};
pub use prompt::build_prompt;
pub use roles::{DEFAULT_SYSTEM_PROMPT, RoleTable};

/// Routes persona-annotated prompts to a completion backend.
///
/// Holds only shared, read-only state, so one instance can serve any number
/// of concurrent requests.
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use completion_client::{CompletionClient, CompletionConfig};
/// # use prompt_router::{InboundMessage, PromptRouter, RoleTable};
/// # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(CompletionClient::new(CompletionConfig::from_env()?)?);
/// let router = PromptRouter::new(Arc::new(RoleTable::builtin()), client);
/// let out = router
///     .handle(InboundMessage::new("What is justice?", "Philosopher"))
///     .await?;
/// println!("{}", out.response);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct PromptRouter {
    roles: Arc<RoleTable>,
    client: Arc<CompletionClient>,
}

impl PromptRouter {
    pub fn new(roles: Arc<RoleTable>, client: Arc<CompletionClient>) -> Self {
        Self { roles, client }
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Validate `message` and answer it.
    ///
    /// # Errors
    /// - [`RouterError::MissingField`] if `data`, `data.prompt` or `data.role` is
    ///   absent; no network call is made in that case
    /// - [`RouterError::Completion`] for any failure of the completion call
    pub async fn handle(&self, message: InboundMessage) -> Result<ResponseEnvelope> {
        let request = PromptRequest::try_from(message)?;
        self.handle_request(&request).await
    }

    /// Answer an already-validated request with default sampling.
    ///
    /// An unknown role is not an error: the default persona is used and the
    /// role cue still carries the caller's role string.
    ///
    /// # Errors
    /// [`RouterError::Completion`] for any failure of the completion call.
    #[instrument(skip_all, fields(role = %request.role))]
    pub async fn handle_request(&self, request: &PromptRequest) -> Result<ResponseEnvelope> {
        let combined = build_prompt(&self.roles, request);

        debug!(
            known_role = self.roles.contains(&request.role),
            prompt_len = combined.len(),
            "routing prompt"
        );

        let response = self.client.generate(&combined).await?;
        Ok(ResponseEnvelope { response })
    }
}
