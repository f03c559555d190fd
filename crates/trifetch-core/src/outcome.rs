//! Per-task outcomes and per-strategy results.
//!
//! A task that fails records a `TaskFailure` instead of propagating an error
//! past the task boundary, so one bad URL never hides the other results.
//! The types serialize to JSON because the multi-process strategy ships them
//! across a process boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Failure category for a single fetch-and-persist task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The fetch attempt failed (connection, DNS, timeout, non-2xx status).
    Network,
    /// Local persistence failed (permission denied, disk full, bad path).
    Storage,
    /// The multi-process strategy could not run a worker or could not read
    /// back its report.
    Worker,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Network => "network",
            FailureKind::Storage => "storage",
            FailureKind::Worker => "worker",
        };
        f.write_str(name)
    }
}

/// Why a single task failed. Carried inside `FetchOutcome::Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TaskFailure {
    pub fn network(err: impl fmt::Display) -> Self {
        Self {
            kind: FailureKind::Network,
            message: err.to_string(),
        }
    }

    pub fn storage(err: impl fmt::Display) -> Self {
        Self {
            kind: FailureKind::Storage,
            message: err.to_string(),
        }
    }

    pub fn worker(err: impl fmt::Display) -> Self {
        Self {
            kind: FailureKind::Worker,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outcome of one fetch-then-write task. Produced once per input URL per
/// strategy run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The resource was fetched and written under `filename`.
    Completed { filename: String },
    /// The task failed; sibling tasks are unaffected.
    Failed { url: String, failure: TaskFailure },
}

impl FetchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, FetchOutcome::Completed { .. })
    }

    /// Filename for a completed task, `None` for a failed one.
    pub fn filename(&self) -> Option<&str> {
        match self {
            FetchOutcome::Completed { filename } => Some(filename),
            FetchOutcome::Failed { .. } => None,
        }
    }
}

/// Everything one strategy run produced: outcomes in input order plus the
/// wall-clock cost of the dispatch+join window. Handed to the caller by
/// value; nothing survives the run that produced it.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub outcomes: Vec<FetchOutcome>,
    pub elapsed: Duration,
}

impl StrategyResult {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn completed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }
}
