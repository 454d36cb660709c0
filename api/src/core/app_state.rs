use std::sync::Arc;

use completion_client::{CompletionClient, CompletionConfig};
use prompt_router::{PromptRouter, RoleTable};

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Persona router with its completion client.
    pub router: PromptRouter,
}

impl AppState {
    pub fn new(router: PromptRouter) -> Self {
        Self { router }
    }

    /// Load shared state from environment variables (see `CompletionConfig::from_env`).
    pub fn from_env() -> AppResult<Self> {
        let client = CompletionClient::new(CompletionConfig::from_env()?)?;
        let router = PromptRouter::new(Arc::new(RoleTable::builtin()), Arc::new(client));
        Ok(Self::new(router))
    }
}
