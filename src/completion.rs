//! One-shot completion requester.
//!
//! Sends a fixed two-message conversation and returns the text of the first
//! choice. The request is identical on every run.

use crate::provider::{ChatRequest, Completion, CompletionApi, Error, Message};
use std::io::{self, Write};

/// Model the conversation is sent to.
pub const MODEL: &str = "gpt-3.5-turbo";
/// Persona instruction, sent first.
pub const SYSTEM_PROMPT: &str = "You are a witty AI bot who only speaks in haikus.";
/// The prompt itself, sent second.
pub const USER_PROMPT: &str = "Tell me a joke about smart homes.";
/// Printed in place of a first choice whose content is null.
pub const NULL_CONTENT: &str = "None";

/// The fixed request: system persona, then user prompt.
#[must_use]
pub fn fixed_conversation() -> ChatRequest {
    ChatRequest {
        model: MODEL.into(),
        messages: vec![Message::system(SYSTEM_PROMPT), Message::user(USER_PROMPT)],
    }
}

/// Text of the first choice. Remaining choices are ignored.
///
/// Null content yields [`NULL_CONTENT`] rather than an error.
pub fn first_choice_text(completion: Completion) -> Result<String, Error> {
    let first = completion
        .choices
        .into_iter()
        .next()
        .ok_or(Error::EmptyChoices)?;

    tracing::debug!(
        index = first.index,
        finish_reason = first.finish_reason.as_deref().unwrap_or("none"),
        "Using first choice"
    );

    Ok(first.content.unwrap_or_else(|| NULL_CONTENT.to_string()))
}

/// Write `text` verbatim followed by a single newline.
pub fn print_completion(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{text}")?;
    out.flush()
}

/// Sends the fixed conversation through a completion backend.
pub struct Requester<A> {
    api: A,
}

impl<A: CompletionApi> Requester<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Send the conversation once and return the first choice's text.
    pub async fn request(&self) -> Result<String, Error> {
        let request = fixed_conversation();
        tracing::debug!(
            provider = self.api.id(),
            model = %request.model,
            messages = request.messages.len(),
            "Requesting completion"
        );

        let completion = self.api.complete(&request).await?;
        if let Some(usage) = completion.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Completion usage"
            );
        }

        first_choice_text(completion)
    }
}
