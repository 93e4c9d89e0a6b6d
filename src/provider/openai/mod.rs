//! OpenAI chat-completions client.

mod client;
mod request;
mod response;


pub use client::{API_KEY_ENV, BASE_URL_ENV, ClientSettings, DEFAULT_BASE_URL, OpenAIClient};
