//! Command-line entry point.

use crate::completion::{Requester, print_completion};
use crate::config::Config;
use crate::provider::OpenAIClient;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Ask a witty haiku bot for a joke about smart homes
#[derive(Parser, Debug)]
#[command(name = "quip", version, about)]
pub struct Cli {
    /// Log request and response details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: <config_dir>/quip/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Run the one-shot request.
pub async fn run(cli: Cli) -> ExitCode {
    match run_inner(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_inner(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load_with_env(&config_path).context("Failed to load config")?;

    let stdout = io::stdout();
    execute(&config, |var| std::env::var(var).ok(), &mut stdout.lock()).await
}

/// Build the client, send the request and print the answer to `out`.
///
/// `out` is only written once the full response has been received.
async fn execute(
    config: &Config,
    lookup: impl Fn(&str) -> Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    let client = OpenAIClient::from_lookup(&config.client_settings(), lookup)?;
    let text = Requester::new(client).request().await?;
    print_completion(out, &text).context("Failed to write response")?;
    Ok(())
}

/// Logging goes to stderr: debug level with `--verbose`, otherwise only when
/// `RUST_LOG` is set.
fn init_tracing(verbose: bool) {
    if verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .try_init();
    } else if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Error as ProviderError;
    use crate::test_support::{completion_body, serve_once};
    use clap::CommandFactory;

    fn config_for(base_url: String) -> Config {
        Config {
            base_url: Some(base_url),
            timeout_secs: Some(30),
            ..Default::default()
        }
    }

    fn with_key(var: &str) -> Option<String> {
        (var == "OPENAI_API_KEY").then(|| "sk-test".to_string())
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["quip", "--verbose", "--config", "/tmp/q.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/q.toml")));
    }

    #[test]
    fn test_conversation_not_configurable() {
        assert!(Cli::try_parse_from(["quip", "write me a poem"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_prints_first_choice() {
        let (base_url, server) = serve_once(200, &completion_body(&["Alexa, tell a joke"]), &[]);
        let mut out = Vec::new();

        execute(&config_for(base_url), with_key, &mut out)
            .await
            .unwrap();
        let captured = server.join().unwrap();

        assert_eq!(captured.authorization.as_deref(), Some("Bearer sk-test"));
        assert_eq!(String::from_utf8(out).unwrap(), "Alexa, tell a joke\n");
    }

    #[tokio::test]
    async fn test_execute_missing_key_prints_nothing() {
        let mut out = Vec::new();
        let config = config_for("http://127.0.0.1:9/v1".to_string());

        let err = execute(&config, |_| None, &mut out).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::MissingApiKey { .. })
        ));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_execute_zero_choices_prints_nothing() {
        let (base_url, server) = serve_once(200, &completion_body(&[]), &[]);
        let mut out = Vec::new();

        let err = execute(&config_for(base_url), with_key, &mut out)
            .await
            .unwrap_err();
        server.join().unwrap();

        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::EmptyChoices)
        ));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_execute_api_error_prints_nothing() {
        let (base_url, server) = serve_once(
            401,
            r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#,
            &[],
        );
        let mut out = Vec::new();

        let err = execute(&config_for(base_url), with_key, &mut out)
            .await
            .unwrap_err();
        server.join().unwrap();

        assert!(err.to_string().contains("Incorrect API key provided"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_execute_quota_message_reaches_error() {
        let (base_url, server) = serve_once(
            429,
            r#"{"error":{"message":"You exceeded your current quota, please check your plan and billing details.","type":"insufficient_quota","code":"insufficient_quota"}}"#,
            &[],
        );
        let mut out = Vec::new();

        let err = execute(&config_for(base_url), with_key, &mut out)
            .await
            .unwrap_err();
        server.join().unwrap();

        let message = format!("{err:#}");
        assert_eq!(
            message,
            "Rate limited: You exceeded your current quota, please check your plan and billing details. (code: insufficient_quota)"
        );
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_execute_null_content_prints_none() {
        let body = serde_json::json!({
            "id": "chatcmpl-null",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": null},
                "finish_reason": "stop"
            }]
        })
        .to_string();
        let (base_url, server) = serve_once(200, &body, &[]);
        let mut out = Vec::new();

        execute(&config_for(base_url), with_key, &mut out)
            .await
            .unwrap();
        server.join().unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "None\n");
    }
}
