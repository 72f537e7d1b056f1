use serde::{Deserialize, Serialize};
use validator::Validate;

/// Browser-side request: one chat message, with an optional stable sender id
/// so the engine can keep per-user conversation state.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageDto {
    #[validate(length(min = 1, message = "No message provided"))]
    pub message: String,
    #[serde(default)]
    pub sender: Option<String>,
}

/// Payload forwarded to the conversational engine's REST endpoint.
#[derive(Debug, Serialize)]
pub struct EnginePayload {
    pub sender: String,
    pub message: String,
}

/// One reply fragment from the engine. Non-text fragments (images, buttons)
/// are tolerated but not relayed.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineReply {
    #[serde(default)]
    pub text: Option<String>,
}

/// One displayable chat line returned to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

impl ChatMessage {
    pub fn bot(text: impl Into<String>) -> Self {
        ChatMessage {
            sender: "bot".to_string(),
            text: text.into(),
        }
    }
}
