use clap::Parser;
use quip::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    quip::cli::run(Cli::parse()).await
}
