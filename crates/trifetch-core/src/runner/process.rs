//! Multi-process strategy: one child process per task, bounded in flight.
//!
//! Each task re-execs the current binary in hidden worker mode; the child
//! fetches and writes in its own address space and reports the serialized
//! outcome as a JSON line on stdout. The dispatcher threads here only spawn
//! children and wait on them, so the unit of concurrency is the process and
//! the bound is the number of live children. Report marshaling cost is part
//! of the measured window on purpose.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::config::TrifetchConfig;
use crate::outcome::{FetchOutcome, StrategyResult, TaskFailure};
use crate::worker;

use super::{collect_in_order, StrategyError};

/// How to start a fetch worker. Split out so tests can substitute a stub.
#[derive(Debug, Clone)]
pub(super) struct WorkerCommand {
    program: PathBuf,
}

impl WorkerCommand {
    /// The worker is this executable, re-invoked in hidden worker mode.
    pub(super) fn current_exe() -> Result<Self, StrategyError> {
        let program = std::env::current_exe().map_err(StrategyError::WorkerExe)?;
        Ok(Self { program })
    }

    #[cfg(test)]
    fn stub(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Spawns one worker for `url`, waits for it, and converts its report
    /// (or its breakdown) into an outcome.
    fn spawn_and_report(&self, url: &str, download_dir: &Path) -> FetchOutcome {
        let output = Command::new(&self.program)
            .arg("--fetch-worker")
            .arg(url)
            .arg("--worker-dir")
            .arg(download_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output();
        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return FetchOutcome::Failed {
                    url: url.to_string(),
                    failure: TaskFailure::worker(format!("spawn worker: {}", e)),
                }
            }
        };
        if !output.status.success() {
            return FetchOutcome::Failed {
                url: url.to_string(),
                failure: TaskFailure::worker(format!("worker exited with {}", output.status)),
            };
        }
        match worker::decode_report(&output.stdout) {
            Some(outcome) => outcome,
            None => FetchOutcome::Failed {
                url: url.to_string(),
                failure: TaskFailure::worker("unreadable worker report".to_string()),
            },
        }
    }
}

/// Runs the batch with up to `cfg.process_workers` children alive at once.
/// The measured window opens before any child is spawned; per-task process
/// startup is deliberately part of the compared cost surface.
pub(super) fn run_pool(
    urls: &[String],
    download_dir: &Path,
    cfg: &TrifetchConfig,
    worker_cmd: &WorkerCommand,
) -> Result<StrategyResult, StrategyError> {
    let count = urls.len();
    let work: Arc<Mutex<VecDeque<(usize, String)>>> =
        Arc::new(Mutex::new(urls.iter().cloned().enumerate().collect()));
    let num_workers = cfg.process_workers.max(1).min(count);

    let start = Instant::now();
    let (tx, rx) = mpsc::channel();
    let mut handles = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let dir = download_dir.to_path_buf();
        let worker_cmd = worker_cmd.clone();
        handles.push(std::thread::spawn(move || loop {
            let (index, url) = match work.lock().unwrap().pop_front() {
                Some(pair) => pair,
                None => break,
            };
            let outcome = worker_cmd.spawn_and_report(&url, &dir);
            let _ = tx.send((index, outcome));
        }));
    }
    drop(tx);

    let outcomes = collect_in_order(rx, count)?;
    for handle in handles {
        handle
            .join()
            .map_err(|_| StrategyError::Pool("dispatcher thread panicked".to_string()))?;
    }
    let elapsed = start.elapsed();

    Ok(StrategyResult { outcomes, elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::FailureKind;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn pool_preserves_input_order_via_stub_worker() {
        // Stub reports the tail of the URL it was handed ($2) as the filename.
        let dir = tempdir().unwrap();
        let stub = write_stub(
            dir.path(),
            "worker.sh",
            "#!/bin/sh\nprintf '{\"status\":\"completed\",\"filename\":\"%s\"}\\n' \"$(basename \"$2\")\"\n",
        );
        let urls: Vec<String> = (0..6)
            .map(|i| format!("http://x.test/{}.png", i))
            .collect();
        let cfg = TrifetchConfig {
            process_workers: 3,
            ..TrifetchConfig::default()
        };
        let result = run_pool(&urls, dir.path(), &cfg, &WorkerCommand::stub(&stub)).unwrap();
        let names: Vec<_> = result.outcomes.iter().filter_map(|o| o.filename()).collect();
        assert_eq!(names, ["0.png", "1.png", "2.png", "3.png", "4.png", "5.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_worker_exit_becomes_worker_failure() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "worker.sh", "#!/bin/sh\nexit 3\n");
        let urls = vec!["http://x.test/a.png".to_string()];
        let cfg = TrifetchConfig::default();
        let result = run_pool(&urls, dir.path(), &cfg, &WorkerCommand::stub(&stub)).unwrap();
        match &result.outcomes[0] {
            FetchOutcome::Failed { failure, .. } => assert_eq!(failure.kind, FailureKind::Worker),
            other => panic!("expected worker failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_report_becomes_worker_failure() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), "worker.sh", "#!/bin/sh\necho not-a-report\n");
        let urls = vec!["http://x.test/a.png".to_string()];
        let cfg = TrifetchConfig::default();
        let result = run_pool(&urls, dir.path(), &cfg, &WorkerCommand::stub(&stub)).unwrap();
        match &result.outcomes[0] {
            FetchOutcome::Failed { failure, .. } => {
                assert_eq!(failure.kind, FailureKind::Worker);
                assert!(failure.message.contains("unreadable"));
            }
            other => panic!("expected worker failure, got {:?}", other),
        }
    }

    #[test]
    fn missing_worker_binary_becomes_worker_failure() {
        let dir = tempdir().unwrap();
        let urls = vec!["http://x.test/a.png".to_string()];
        let cfg = TrifetchConfig::default();
        let bogus = dir.path().join("no-such-worker");
        let result = run_pool(&urls, dir.path(), &cfg, &WorkerCommand::stub(bogus)).unwrap();
        match &result.outcomes[0] {
            FetchOutcome::Failed { failure, .. } => {
                assert_eq!(failure.kind, FailureKind::Worker);
                assert!(failure.message.contains("spawn worker"));
            }
            other => panic!("expected worker failure, got {:?}", other),
        }
    }
}
