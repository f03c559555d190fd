//! Cooperative strategy: every task is a future on one scheduler thread.
//!
//! `join_all` drives all task futures in the same poll loop, so they
//! interleave at await points and the output order matches the input order
//! with no bookkeeping. A CPU-bound task would starve its siblings; this
//! workload suspends at every network and disk boundary.

use std::path::Path;
use std::time::Instant;

use crate::config::TrifetchConfig;
use crate::fetch::{self, FetchOptions};
use crate::outcome::StrategyResult;

use super::{task, StrategyError};

/// Runs the batch on a current-thread tokio runtime. Runtime construction
/// happens before the measured window opens (the scheduler must exist to
/// take the timestamp); building the shared HTTP client and scheduling the
/// tasks happen inside it.
pub(super) fn run_all(
    urls: &[String],
    download_dir: &Path,
    cfg: &TrifetchConfig,
) -> Result<StrategyResult, StrategyError> {
    let opts = FetchOptions::from_config(cfg);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(StrategyError::Runtime)?;

    runtime.block_on(async {
        let start = Instant::now();
        let client = fetch::build_client(&opts).map_err(StrategyError::Client)?;
        let tasks = urls
            .iter()
            .map(|url| task::run_single_async(&client, url, download_dir));
        let outcomes = futures::future::join_all(tasks).await;
        Ok(StrategyResult {
            outcomes,
            elapsed: start.elapsed(),
        })
    })
}
