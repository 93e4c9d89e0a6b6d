//! OpenAI chat-completions request types.

use crate::provider::types::ChatRequest;
use serde::Serialize;

/// Top-level request body for `/chat/completions`.
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
}

/// A message in the conversation.
#[derive(Debug, Serialize)]
pub struct OpenAIMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<&ChatRequest> for OpenAIRequest {
    fn from(request: &ChatRequest) -> Self {
        Self {
            model: request.model.to_string(),
            messages: request
                .messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.as_str(),
                    content: m.content.to_string(),
                })
                .collect(),
        }
    }
}
