use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remote_autoapply::aggregate::Aggregator;
use remote_autoapply::apply::{Applicator, ChromeLauncher};
use remote_autoapply::config::Config;
use remote_autoapply::cycle::{Cycle, Recorder};
use remote_autoapply::remote_log::RemoteTable;
use remote_autoapply::scheduler::Scheduler;
use remote_autoapply::store::AppliedStore;
use remote_autoapply::{liveness, sources};

#[derive(Debug, Parser)]
#[command(about = "Scrape remote job boards and auto-apply to matching postings")]
struct Args {
    /// JSON settings file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Run a single cycle in the foreground and exit
    #[arg(long)]
    once: bool,
}

fn build_cycle(config: &Config) -> Result<Cycle> {
    let client = sources::http_client(config.request_timeout()).context("building http client")?;

    let aggregator = Aggregator::new(
        sources::default_sources(&client),
        config.keywords.clone(),
        config.max_results,
    );
    let applicator = Applicator::from_config(Box::new(ChromeLauncher::new(config.headless)), config);

    let remote = config.remote_table.clone().map(|table| {
        tracing::info!(table = %table.table_name, "remote table logging enabled");
        RemoteTable::new(client.clone(), table)
    });
    let recorder = Recorder::new(AppliedStore::new(&config.applied_csv_path), remote);

    Ok(Cycle::new(aggregator, applicator, recorder))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,remote_autoapply=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    tracing::info!(
        keywords = ?config.keywords,
        max_results = config.max_results,
        "config loaded"
    );

    let interval = config.interval();
    let listen_addr = config.listen_addr.clone();

    // reqwest's blocking client owns a runtime of its own; keep it off tokio's workers.
    let cycle = tokio::task::spawn_blocking(move || build_cycle(&config)).await??;

    if args.once {
        tokio::task::spawn_blocking(move || cycle.run_once()).await?;
        return Ok(());
    }

    Scheduler::new(interval)
        .spawn(cycle)
        .context("starting scheduler thread")?;
    tracing::info!("scheduler thread started");

    liveness::serve(&listen_addr)
        .await
        .with_context(|| format!("serving liveness on {listen_addr}"))
}
