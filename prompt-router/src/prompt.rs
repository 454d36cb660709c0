//! Prompt builder: persona system prompt + user line + role cue.

use crate::{api_types::PromptRequest, roles::RoleTable};

/// Build the combined prompt sent to the completion backend.
///
/// Layout is `"{system_prompt}\nUser: {prompt}\n{role}:"`. The trailing
/// `"{role}:"` cues the model to answer in persona. Nothing is escaped,
/// trimmed, or truncated.
///
/// # Example
/// ```
/// use prompt_router::{PromptRequest, RoleTable, build_prompt};
///
/// let req = PromptRequest { prompt: "hi".into(), role: "Unknown".into() };
/// let p = build_prompt(&RoleTable::builtin(), &req);
/// assert_eq!(p, "You are a helpful assistant.\nUser: hi\nUnknown:");
/// ```
pub fn build_prompt(roles: &RoleTable, request: &PromptRequest) -> String {
    let system = roles.system_prompt(&request.role);
    format!("{system}\nUser: {}\n{}:", request.prompt, request.role)
}
