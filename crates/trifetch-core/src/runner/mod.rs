//! Strategy runner: one batch of fetch-then-write tasks under a chosen
//! concurrency discipline.
//!
//! All three strategies satisfy the same contract: dispatch one task per
//! URL, join on every task (full barrier, success or failure alike), return
//! outcomes in input order together with the wall-clock cost of the
//! dispatch+join window. A failing task becomes a `Failed` outcome;
//! `StrategyError` is reserved for conditions outside task execution.

mod cooperative;
mod process;
mod task;
mod threaded;

pub use task::run_single_blocking;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::mpsc;
use thiserror::Error;

use crate::config::TrifetchConfig;
use crate::outcome::{FetchOutcome, StrategyResult};

/// The three concurrency disciplines under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Bounded pool of OS threads sharing one address space.
    Threaded,
    /// Bounded pool of child processes; isolation is structural.
    MultiProcess,
    /// Single-threaded cooperative scheduler suspending at I/O boundaries.
    CooperativeAsync,
}

impl Strategy {
    /// All strategies in the fixed comparison (and output) order.
    pub const ALL: [Strategy; 3] = [
        Strategy::Threaded,
        Strategy::MultiProcess,
        Strategy::CooperativeAsync,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Threaded => "threaded",
            Strategy::MultiProcess => "multi-process",
            Strategy::CooperativeAsync => "cooperative-async",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, StrategyError> {
        match s {
            "threaded" => Ok(Strategy::Threaded),
            "multi-process" | "multiprocess" => Ok(Strategy::MultiProcess),
            "cooperative-async" | "async" => Ok(Strategy::CooperativeAsync),
            other => Err(StrategyError::Unknown(other.to_string())),
        }
    }
}

/// Fatal runner error. Task-level failures never end up here; they are
/// folded into `FetchOutcome::Failed` entries instead.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("unknown strategy selector: {0:?}")]
    Unknown(String),
    #[error("cannot locate worker executable: {0}")]
    WorkerExe(std::io::Error),
    #[error("cannot build cooperative runtime: {0}")]
    Runtime(std::io::Error),
    #[error("cannot build http client: {0}")]
    Client(reqwest::Error),
    #[error("worker pool failed: {0}")]
    Pool(String),
}

/// Runs the whole batch under `strategy`, writing files into `download_dir`.
///
/// Does not return until every task has finished, regardless of individual
/// failures. Outcomes are in input order, not completion order.
pub fn run(
    urls: &[String],
    strategy: Strategy,
    download_dir: &Path,
    cfg: &TrifetchConfig,
) -> Result<StrategyResult, StrategyError> {
    tracing::debug!(strategy = %strategy, urls = urls.len(), "dispatching batch");
    match strategy {
        Strategy::Threaded => threaded::run_pool(urls, download_dir, cfg),
        Strategy::MultiProcess => {
            let worker_cmd = process::WorkerCommand::current_exe()?;
            process::run_pool(urls, download_dir, cfg, &worker_cmd)
        }
        Strategy::CooperativeAsync => cooperative::run_all(urls, download_dir, cfg),
    }
}

/// Receives `(index, outcome)` pairs from pool workers and assembles them in
/// input order. Used by both pooled strategies.
fn collect_in_order(
    rx: mpsc::Receiver<(usize, FetchOutcome)>,
    count: usize,
) -> Result<Vec<FetchOutcome>, StrategyError> {
    let mut slots: Vec<Option<FetchOutcome>> = vec![None; count];
    for _ in 0..count {
        let (index, outcome) = rx
            .recv()
            .map_err(|_| StrategyError::Pool("result channel closed early".to_string()))?;
        slots[index] = Some(outcome);
    }
    let outcomes: Vec<FetchOutcome> = slots.into_iter().flatten().collect();
    if outcomes.len() != count {
        return Err(StrategyError::Pool(
            "duplicate or missing task index".to_string(),
        ));
    }
    Ok(outcomes)
}
