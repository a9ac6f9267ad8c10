//! Tracecheck CLI
//!
//! Runs the end-to-end trace scenarios against a live sample app and trace
//! query API, exiting non-zero if any of them fails.
//!
//! # Usage
//!
//! ```bash
//! tracecheck --help
//! tracecheck --sample python.traces.api all
//! TRACECHECK_SAMPLE=go.traces tracecheck trace
//! ```

#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use harness::config::{DEFAULT_SAMPLE, SAMPLE_ENV_VAR};
use harness::{scenario, Config, TraceClient};

/// Tracecheck - verify a sample app's spans reach the trace backend
#[derive(Parser)]
#[command(name = "tracecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The name of the sample app used to query traces
    #[arg(short, long, env = SAMPLE_ENV_VAR, default_value = DEFAULT_SAMPLE)]
    sample: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the trace the sample emitted on its own
    Trace,
    /// Call the sample API, wait for its trace and check it
    Api,
    /// Run both scenarios in order
    All,
}

async fn run_trace(client: &TraceClient) -> anyhow::Result<()> {
    let trace = scenario::run_sample_scenario(client)
        .await
        .context("Trace generated from sample")?;
    println!("ok   trace  {} ({} span)", trace.trace_id, trace.span_count());
    Ok(())
}

async fn run_api(client: &TraceClient) -> anyhow::Result<()> {
    let trace = scenario::run_api_scenario(client)
        .await
        .context("Trace generated from sample API")?;
    println!("ok   api    {} ({} spans)", trace.trace_id, trace.span_count());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Tracecheck CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = Config::new(cli.sample)?;
    let client = TraceClient::new(&config);
    tracing::info!(sample = %config.sample, "Running trace checks");

    match command {
        Commands::Trace => run_trace(&client).await?,
        Commands::Api => run_api(&client).await?,
        Commands::All => {
            run_trace(&client).await?;
            run_api(&client).await?;
        }
    }

    Ok(())
}
