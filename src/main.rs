//! BugHawk client binary entry point.
//!
//! Submits logs and/or a code snippet for analysis and prints the report.
//! Logs go to stderr; stdout carries only the report text.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;
use std::process::ExitCode;

use bughawk_client::analyzer::{render_outcome, Analyzer};
use bughawk_client::api::AnalysisClient;
use bughawk_client::config::{validate_config, Config};
use bughawk_client::error::{AppError, ConfigError};
use clap::Parser;
use tokio_util::sync::CancellationToken;

/// Submit logs or code to the BugHawkAI service and print the analysis.
#[derive(Debug, Parser)]
#[command(name = "bughawk", version, about)]
struct Cli {
    /// Log text to analyze.
    #[arg(long, conflicts_with = "logs_file")]
    logs: Option<String>,

    /// Read log text from a file.
    #[arg(long)]
    logs_file: Option<PathBuf>,

    /// Code snippet to analyze.
    #[arg(long, conflicts_with = "code_file")]
    code: Option<String>,

    /// Read the code snippet from a file.
    #[arg(long)]
    code_file: Option<PathBuf>,

    /// Platform identifier (overrides `BUGHAWK_PLATFORM`).
    #[arg(long)]
    platform: Option<String>,

    /// Language identifier (overrides `BUGHAWK_LANGUAGE`).
    #[arg(long)]
    language: Option<String>,

    /// Extra context sent with the request, as `key=value`.
    #[arg(long = "context", value_parser = parse_key_value)]
    context: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> std::io::Result<Option<String>> {
    match (text, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => std::fs::read_to_string(path).map(Some),
        (None, None) => Ok(None),
    }
}

/// Load configuration, apply CLI overrides, and build the analyzer.
fn setup(cli: Cli, config: Result<Config, ConfigError>) -> Result<Prepared, AppError> {
    let mut config = config?;
    if let Some(platform) = cli.platform {
        config.platform = platform;
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    validate_config(&config)?;

    tracing::info!(
        base_url = %config.base_url,
        max_attempts = config.max_attempts,
        max_poll_attempts = config.max_poll_attempts,
        "Configuration loaded"
    );

    let logs = read_input(cli.logs, cli.logs_file)?;
    let code = read_input(cli.code, cli.code_file)?;

    let client = AnalysisClient::new(config.client_config())?;
    let builder = cli
        .context
        .into_iter()
        .fold(config.request_builder(), |b, (k, v)| b.with_context(k, v));

    Ok(Prepared {
        analyzer: Analyzer::new(client, builder, config.poller_config()),
        logs,
        code,
    })
}

/// A ready-to-run analysis.
struct Prepared {
    analyzer: Analyzer<AnalysisClient>,
    logs: Option<String>,
    code: Option<String>,
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load config (and .env) first so LOG_LEVEL from either source applies
    let config = Config::from_env();
    let filter = config
        .as_ref()
        .map_or_else(|_| Config::default().log_filter(), Config::log_filter);

    // Initialize logging to stderr only (stdout is for the report)
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let Prepared {
        analyzer,
        logs,
        code,
    } = match setup(cli, config) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling analysis");
            on_signal.cancel();
        }
    });

    let outcome = analyzer
        .analyze_with_progress(logs.as_deref(), code.as_deref(), &cancel, |pending| {
            eprintln!("Analysis in progress... ({})", pending.status);
        })
        .await;

    println!("{}", render_outcome(&outcome));
    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
