//! Binary entry point for `issue-scribe`.
//!
//! This module provides the command-line interface for issue-scribe with options
//! for configuration file paths and logging verbosity. It initializes logging
//! and runs the rewrite once.

use clap::Parser;
use issue_scribe::base::{config::Config, types::Void};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Issue-scribe – rewrites a GitHub issue's raw notes into a structured body.
///
/// Configuration comes from environment variables (`OPENAI_API_KEY`, `GH_TOKEN`,
/// `REPO_FULL`, `ISSUE_NUMBER`, ...) or an optional `config.toml`. The bot is
/// meant to run as a single CI step triggered by an issue event.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the issue-scribe binary.
///
/// Sets up logging based on verbosity, loads configuration, and rewrites the issue.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer, only when a collector is configured.

    let provider = match std::env::var_os("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Some(_) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
            Some(SdkTracerProvider::builder().with_simple_exporter(exporter).build())
        }
        None => None,
    };

    let otel = provider.as_ref().map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer("issue-scribe")));

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    let config = Config::load(args.config.as_deref())?;

    let result = issue_scribe::start(config).await;

    if let Some(provider) = provider
        && let Err(err) = provider.shutdown()
    {
        tracing::warn!("Failed to flush spans to the OTLP collector: {err}");
    }

    result
}
