//! HTTP transport for completion requests.

mod client;

pub use client::{ApiKey, HttpClient};
