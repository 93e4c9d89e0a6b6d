//! Chat-completion provider.
//!
//! Wire types, HTTP transport and the OpenAI client sit behind the
//! [`CompletionApi`] trait.
//!
//! # Example
//!
//! ```ignore
//! use quip::provider::{ClientSettings, CompletionApi, OpenAIClient};
//!
//! let client = OpenAIClient::from_lookup(&ClientSettings::default(), |var| {
//!     std::env::var(var).ok()
//! })?;
//! let completion = client.complete(&request).await?;
//! ```

mod client;
mod error;
mod http;
mod openai;
mod types;

pub use client::CompletionApi;
pub use error::{Error, format_api_error};
pub use openai::{API_KEY_ENV, BASE_URL_ENV, ClientSettings, DEFAULT_BASE_URL, OpenAIClient};
pub use types::*;
