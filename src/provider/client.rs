//! Completion API seam.

use super::error::Error;
use super::types::{ChatRequest, Completion};
use async_trait::async_trait;

/// A backend that answers a chat request with a single, complete response.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Get the provider identifier.
    fn id(&self) -> &str;
    /// Get a non-streaming chat completion.
    async fn complete(&self, request: &ChatRequest) -> Result<Completion, Error>;
}
