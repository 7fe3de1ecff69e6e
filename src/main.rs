//! feed-enricher - enrich JSON Feeds through a rate-budgeted model API
//!
//! Loads a feed configuration, fetches the feeds, runs translation, tagging,
//! bots and the daily overview, and writes the results.

#![allow(missing_docs)]

use clap::Parser;
use feed_enricher::utils::logging::init_tracing;
use feed_enricher::{CallGate, Config, FeedFetcher, Result, RunSummary, build_info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "feed-enricher", version, about)]
struct Args {
    /// Feed configuration file (JSON or YAML)
    #[arg(short, long, env = "FEED_CONFIG_PATH")]
    config: PathBuf,

    /// Directory for output files
    #[arg(long, env = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Day to summarize (YYYY-MM-DD), yesterday by default
    #[arg(long, env = "OVERVIEW_DAY")]
    overview_day: Option<String>,

    /// Send each task as a single batch
    #[arg(long)]
    no_batch: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let build = build_info();
    info!(version = build.version, git_hash = build.git_hash, "Starting feed-enricher");

    let span = info_span!("run", run_id = %Uuid::new_v4());
    match execute(args).instrument(span).await {
        Ok(summary) => {
            info!(
                items = summary.items,
                translated = summary.translated,
                bot_items = summary.bot_items,
                overview_day = summary.overview_day.as_deref().unwrap_or("-"),
                files = summary.written.len(),
                "Run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(retryable = e.is_retryable(), "Execution failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Args) -> Result<RunSummary> {
    let mut config = Config::from_file(&args.config).await?;
    config.apply_env();
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }
    if let Some(day) = args.overview_day {
        config.output.overview_day = Some(day);
    }
    config.validate()?;
    config.bump_version().await?;

    // Applied after the write-back so the flag never lands in the file
    if args.no_batch {
        config.feed.no_batch = true;
    }

    let gate = Arc::new(CallGate::new(config.gate_config())?);
    let fetcher = FeedFetcher::new()?;
    let summary = feed_enricher::run(&config, &fetcher, gate.clone()).await?;

    let stats = gate.stats().await;
    info!(
        admitted = stats.admitted,
        peak_in_flight = stats.peak_in_flight,
        rate_limit_retries = stats.rate_limit_retries,
        "Gate statistics"
    );

    Ok(summary)
}
