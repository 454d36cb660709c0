//! Public API types re-used by external crates (e.g., the HTTP API layer).

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// Structured message as received from the caller: `{ "data": { "prompt", "role" } }`.
///
/// Every field is optional at the wire level so that an absent field becomes a
/// [`RouterError::MissingField`] naming it, instead of a generic decode error.
///
/// # Example
/// ```
/// use prompt_router::{InboundMessage, PromptRequest};
///
/// let msg = InboundMessage::new("What is justice?", "Philosopher");
/// let req = PromptRequest::try_from(msg).unwrap();
/// assert_eq!(req.role, "Philosopher");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub data: Option<MessageData>,
}

/// Payload nested under `data`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MessageData {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl InboundMessage {
    /// Message with both fields present.
    pub fn new(prompt: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            data: Some(MessageData {
                prompt: Some(prompt.into()),
                role: Some(role.into()),
            }),
        }
    }
}

/// Validated request: both fields are present (they may still be empty strings).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptRequest {
    /// User text, forwarded verbatim.
    pub prompt: String,
    /// Persona key; unknown values are allowed.
    pub role: String,
}

impl TryFrom<InboundMessage> for PromptRequest {
    type Error = RouterError;

    fn try_from(msg: InboundMessage) -> Result<Self, Self::Error> {
        let data = msg.data.ok_or(RouterError::MissingField("data"))?;
        let prompt = data.prompt.ok_or(RouterError::MissingField("data.prompt"))?;
        let role = data.role.ok_or(RouterError::MissingField("data.role"))?;
        Ok(Self { prompt, role })
    }
}

/// Single-field response envelope: `{ "response": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseEnvelope {
    /// Generated text; empty when the backend returned no usable `text`.
    pub response: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(v: serde_json::Value) -> Result<PromptRequest, RouterError> {
        let msg: InboundMessage = serde_json::from_value(v).unwrap();
        PromptRequest::try_from(msg)
    }

    #[test]
    fn complete_message_converts() {
        let req = parse(json!({ "data": { "prompt": "hi", "role": "Unknown" } })).unwrap();
        assert_eq!(
            req,
            PromptRequest {
                prompt: "hi".into(),
                role: "Unknown".into()
            }
        );
    }

    #[test]
    fn missing_fields_are_named() {
        assert!(matches!(
            parse(json!({})),
            Err(RouterError::MissingField("data"))
        ));
        assert!(matches!(
            parse(json!({ "data": { "role": "Doctor" } })),
            Err(RouterError::MissingField("data.prompt"))
        ));
        assert!(matches!(
            parse(json!({ "data": { "prompt": "hi" } })),
            Err(RouterError::MissingField("data.role"))
        ));
        assert!(matches!(
            parse(json!({ "data": { "prompt": null, "role": "Doctor" } })),
            Err(RouterError::MissingField("data.prompt"))
        ));
    }

    #[test]
    fn empty_strings_are_present() {
        let req = parse(json!({ "data": { "prompt": "", "role": "" } })).unwrap();
        assert!(req.prompt.is_empty());
        assert!(req.role.is_empty());
    }

    #[test]
    fn envelope_shape() {
        let env = ResponseEnvelope {
            response: "ok".into(),
        };
        assert_eq!(serde_json::to_value(&env).unwrap(), json!({ "response": "ok" }));
    }
}
