//! Persona lookup: role name → system prompt.

use std::collections::HashMap;

/// System prompt used for any role the table does not know.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Built-in personas.
const BUILTIN_ROLES: &[(&str, &str)] = &[
    (
        "Philosopher",
        "You are a deep thinking philosopher. Always reason deeply.",
    ),
    (
        "Engineer",
        "You are a practical engineer. Always explain with steps and examples.",
    ),
    (
        "Doctor",
        "You are a professional medical advisor. Be factual and empathetic.",
    ),
    (
        "Lawyer",
        "You are a law expert. Answer strictly based on legal codes.",
    ),
    (
        "Fitness Coach",
        "You are a motivational fitness coach. Always encourage action.",
    ),
];

/// Immutable mapping from role name to system prompt.
///
/// Built once at startup and shared behind an `Arc`; it exposes no mutation,
/// so concurrent readers need no synchronization. Lookups are exact and
/// case-sensitive, and never fail.
///
/// # Example
/// ```
/// use prompt_router::{RoleTable, DEFAULT_SYSTEM_PROMPT};
///
/// let roles = RoleTable::builtin();
/// assert!(roles.system_prompt("Lawyer").starts_with("You are a law expert."));
/// assert_eq!(roles.system_prompt("Pirate"), DEFAULT_SYSTEM_PROMPT);
/// ```
#[derive(Debug, Clone)]
pub struct RoleTable {
    entries: HashMap<String, String>,
}

impl RoleTable {
    /// Table with the built-in personas.
    pub fn builtin() -> Self {
        BUILTIN_ROLES.iter().copied().collect()
    }

    /// System prompt for `role`, or [`DEFAULT_SYSTEM_PROMPT`] on a miss.
    pub fn system_prompt(&self, role: &str) -> &str {
        self.entries
            .get(role)
            .map(String::as_str)
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    /// Whether `role` has a dedicated entry.
    pub fn contains(&self, role: &str) -> bool {
        self.entries.contains_key(role)
    }

    /// Known role names, sorted.
    pub fn roles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<K, V> FromIterator<(K, V)> for RoleTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
