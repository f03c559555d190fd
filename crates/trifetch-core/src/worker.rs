//! Worker-mode report protocol for the multi-process strategy.
//!
//! A worker process performs one fetch-then-write task and reports the
//! resulting `FetchOutcome` as a single JSON line on stdout. The coordinator
//! parses the last non-empty line, so stray output earlier in the stream
//! cannot poison the report.

use crate::outcome::FetchOutcome;

/// Serializes an outcome as the one-line report a worker prints on stdout.
pub fn encode_report(outcome: &FetchOutcome) -> serde_json::Result<String> {
    serde_json::to_string(outcome)
}

/// Parses a finished worker's captured stdout back into an outcome.
/// Returns `None` when no line parses as a report.
pub fn decode_report(stdout: &[u8]) -> Option<FetchOutcome> {
    let text = std::str::from_utf8(stdout).ok()?;
    let line = text.lines().rev().find(|l| !l.trim().is_empty())?;
    serde_json::from_str(line.trim()).ok()
}
