#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod provider;

#[cfg(test)]
mod test_support;
