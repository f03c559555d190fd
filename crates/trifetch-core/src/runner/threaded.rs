//! Threaded strategy: a bounded pool of OS threads over a shared work queue.
//!
//! Workers pop `(index, url)` pairs off the queue and send `(index, outcome)`
//! back over an mpsc channel; the coordinator fills positional slots so the
//! result order matches the input regardless of completion order. Tasks
//! share no mutable state; the only cross-task hazard is two URLs deriving
//! the same filename, which is last-writer-wins.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::config::TrifetchConfig;
use crate::fetch::FetchOptions;
use crate::outcome::StrategyResult;

use super::{collect_in_order, task, StrategyError};

/// Runs the batch on `cfg.thread_workers` OS threads, clamped to the task
/// count. The measured window opens before the workers are spawned, so pool
/// startup is part of the reported cost.
pub(super) fn run_pool(
    urls: &[String],
    download_dir: &Path,
    cfg: &TrifetchConfig,
) -> Result<StrategyResult, StrategyError> {
    let count = urls.len();
    let work: Arc<Mutex<VecDeque<(usize, String)>>> =
        Arc::new(Mutex::new(urls.iter().cloned().enumerate().collect()));
    let opts = FetchOptions::from_config(cfg);
    let num_workers = cfg.thread_workers.max(1).min(count);

    let start = Instant::now();
    let (tx, rx) = mpsc::channel();
    let mut handles = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let dir = download_dir.to_path_buf();
        handles.push(std::thread::spawn(move || loop {
            let (index, url) = match work.lock().unwrap().pop_front() {
                Some(pair) => pair,
                None => break,
            };
            let outcome = task::run_single_blocking(&url, &dir, &opts);
            let _ = tx.send((index, outcome));
        }));
    }
    drop(tx);

    let outcomes = collect_in_order(rx, count)?;
    for handle in handles {
        handle
            .join()
            .map_err(|_| StrategyError::Pool("worker thread panicked".to_string()))?;
    }
    let elapsed = start.elapsed();

    Ok(StrategyResult { outcomes, elapsed })
}
