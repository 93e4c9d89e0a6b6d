//! OpenAI chat-completions client.

use super::request::OpenAIRequest;
use super::response::OpenAIResponse;
use crate::provider::client::CompletionApi;
use crate::provider::error::Error;
use crate::provider::http::{ApiKey, HttpClient};
use crate::provider::types::{ChatRequest, Completion};
use async_trait::async_trait;
use std::time::Duration;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the endpoint base URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Hosted OpenAI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Transport settings resolved from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

/// Native OpenAI chat-completions client.
#[derive(Debug)]
pub struct OpenAIClient {
    http: HttpClient,
}

impl OpenAIClient {
    /// Create a client with an explicit API key. An empty key is rejected.
    pub fn new(api_key: impl Into<String>, settings: &ClientSettings) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::MissingApiKey {
                env_var: API_KEY_ENV,
            });
        }

        let http = HttpClient::new(
            settings.base_url.clone(),
            ApiKey::new(api_key),
            settings.timeout,
            settings.connect_timeout,
        );
        Ok(Self { http })
    }

    /// Create a client resolving the API key through `lookup`.
    pub fn from_lookup(
        settings: &ClientSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey {
                env_var: API_KEY_ENV,
            })?;
        Self::new(api_key, settings)
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[async_trait]
impl CompletionApi for OpenAIClient {
    fn id(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<Completion, Error> {
        let api_request = OpenAIRequest::from(request);

        tracing::debug!(
            base_url = %self.http.base_url(),
            model = %api_request.model,
            messages = api_request.messages.len(),
            "OpenAI API request"
        );

        let response: OpenAIResponse = self
            .http
            .post_json("/chat/completions", &api_request)
            .await?;

        tracing::debug!(
            id = %response.id,
            model = %response.model,
            choices = response.choices.len(),
            prompt_tokens = response.usage.as_ref().map_or(0, |u| u.prompt_tokens),
            completion_tokens = response.usage.as_ref().map_or(0, |u| u.completion_tokens),
            "OpenAI API response"
        );

        Ok(response.into())
    }
}
