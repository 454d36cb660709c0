//! GET /roles — lists the personas the router knows.

use std::sync::Arc;

use axum::{Json, extract::State};
use prompt_router::DEFAULT_SYSTEM_PROMPT;
use serde::Serialize;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    /// Known role names, sorted.
    pub roles: Vec<String>,
    /// Persona used for any other role.
    pub default_prompt: &'static str,
}

pub async fn list_roles(State(state): State<Arc<AppState>>) -> Json<RolesResponse> {
    let roles = state
        .router
        .roles()
        .roles()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(RolesResponse {
        roles,
        default_prompt: DEFAULT_SYSTEM_PROMPT,
    })
}
