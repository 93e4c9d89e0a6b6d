//! OpenAI chat-completions response types.

use crate::provider::types::{Completion, CompletionChoice, Usage as CompletionUsage};
use serde::Deserialize;

/// Response from `/chat/completions`. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A choice in the response.
#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: usize,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message content in a response.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl From<OpenAIResponse> for Completion {
    fn from(response: OpenAIResponse) -> Self {
        Self {
            id: response.id,
            model: response.model,
            choices: response
                .choices
                .into_iter()
                .map(|c| CompletionChoice {
                    index: c.index,
                    content: c.message.content,
                    finish_reason: c.finish_reason,
                })
                .collect(),
            usage: response.usage.map(|u| CompletionUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        }
    }
}
