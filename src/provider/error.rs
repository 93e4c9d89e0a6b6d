//! Provider error types.

use thiserror::Error;

/// Format an API error for display, pulling the message out of a JSON body.
///
/// `"HTTP 401: {"error": {"message": "Incorrect API key", "code": "invalid_api_key"}}"`
/// becomes `"HTTP 401: Incorrect API key (code: invalid_api_key)"`. Plain text
/// passes through unchanged.
#[must_use]
pub fn format_api_error(error: &str) -> String {
    if let Some(json_start) = error.find('{')
        && let Ok(json) = serde_json::from_str::<serde_json::Value>(&error[json_start..])
        && let Some(msg) = extract_error_message(&json)
    {
        let prefix = error[..json_start].trim();
        if prefix.is_empty() {
            return msg;
        }
        return format!("{prefix} {msg}");
    }

    error.to_string()
}

/// Pull a readable message from an OpenAI-style error object.
fn extract_error_message(json: &serde_json::Value) -> Option<String> {
    if let Some(error_obj) = json.get("error") {
        if let Some(msg) = error_obj.get("message").and_then(|v| v.as_str()) {
            return Some(match error_obj.get("code").and_then(|v| v.as_str()) {
                Some(code) => format!("{msg} (code: {code})"),
                None => msg.to_string(),
            });
        }

        if let Some(msg) = error_obj.as_str() {
            return Some(msg.to_string());
        }
    }

    json.get("message")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing API key. Set {env_var}")]
    MissingApiKey { env_var: &'static str },

    #[error("API error: {}", format_api_error(.0))]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited{}: {}", retry_hint(.retry_after), format_api_error(.message))]
    RateLimited {
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Response contained no choices")]
    EmptyChoices,
}

/// ` (retry after 7s)`, or nothing when the server gave no hint.
fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}
