//! CLI for trifetch: run one batch of URLs under all three strategies.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use trifetch_core::config::{self, TrifetchConfig};
use trifetch_core::fetch::FetchOptions;
use trifetch_core::outcome::{FetchOutcome, StrategyResult};
use trifetch_core::runner::{self, Strategy};
use trifetch_core::worker;

/// Fetch every URL once per concurrency strategy and report per-strategy
/// wall-clock time. Files land in the current working directory, named by
/// the last path segment of each URL.
#[derive(Debug, Parser)]
#[command(name = "trifetch")]
#[command(
    about = "Compare threaded, multi-process and cooperative-async batch downloads",
    long_about = None
)]
pub struct Cli {
    /// URLs to fetch, in order.
    pub urls: Vec<String>,

    /// Internal: run as a fetch worker for the multi-process strategy.
    #[arg(long, value_name = "URL", hide = true)]
    pub fetch_worker: Option<String>,

    /// Internal: download directory for worker mode.
    #[arg(long, value_name = "DIR", hide = true)]
    pub worker_dir: Option<PathBuf>,
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    if let Some(url) = cli.fetch_worker.as_deref() {
        let dir = match cli.worker_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("resolve working directory")?,
        };
        return run_worker(url, &dir, &cfg);
    }

    let download_dir = std::env::current_dir().context("resolve working directory")?;
    for strategy in Strategy::ALL {
        let result = runner::run(&cli.urls, strategy, &download_dir, &cfg)
            .with_context(|| format!("{} strategy failed", strategy))?;
        tracing::info!(
            strategy = %strategy,
            completed = result.completed_count(),
            total = result.outcomes.len(),
            elapsed_secs = result.elapsed_secs(),
            "strategy finished"
        );
        print_strategy_result(strategy, &result);
    }
    Ok(())
}

/// Hidden worker entry point: one fetch-then-write task, report on stdout.
/// Exits 0 whether the task succeeded or failed; the report carries that.
fn run_worker(url: &str, dir: &Path, cfg: &TrifetchConfig) -> Result<()> {
    let opts = FetchOptions::from_config(cfg);
    let outcome = runner::run_single_blocking(url, dir, &opts);
    let report = worker::encode_report(&outcome).context("encode worker report")?;
    println!("{}", report);
    Ok(())
}

fn print_strategy_result(strategy: Strategy, result: &StrategyResult) {
    println!("Downloading with the {} strategy:", strategy);
    for outcome in &result.outcomes {
        match outcome {
            FetchOutcome::Completed { filename } => println!("Downloaded {}", filename),
            FetchOutcome::Failed { url, failure } => println!("Failed {}: {}", url, failure),
        }
    }
    println!("Total elapsed time: {:.3} seconds", result.elapsed_secs());
    println!();
}
