//! The unit of work: fetch one URL, persist the body, record the outcome.

use std::path::Path;

use crate::fetch::{self, FetchOptions};
use crate::outcome::{FetchOutcome, TaskFailure};
use crate::storage;
use crate::url_model;

/// Blocking fetch-then-write for one URL. Never returns an error: every
/// failure is folded into the outcome so sibling tasks stay unaffected.
/// Also the body of a fetch worker in the multi-process strategy.
pub fn run_single_blocking(url: &str, download_dir: &Path, opts: &FetchOptions) -> FetchOutcome {
    let Some(filename) = url_model::filename_from_url(url) else {
        return no_filename(url);
    };
    let bytes = match fetch::fetch_blocking(url, opts) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(url, error = %e, "fetch failed");
            return FetchOutcome::Failed {
                url: url.to_string(),
                failure: TaskFailure::network(e),
            };
        }
    };
    match storage::write_bytes(download_dir, &filename, &bytes) {
        Ok(()) => FetchOutcome::Completed { filename },
        Err(e) => FetchOutcome::Failed {
            url: url.to_string(),
            failure: TaskFailure::storage(e),
        },
    }
}

/// Cooperative variant: suspends at the network and disk boundaries instead
/// of blocking the scheduler thread.
pub(super) async fn run_single_async(
    client: &reqwest::Client,
    url: &str,
    download_dir: &Path,
) -> FetchOutcome {
    let Some(filename) = url_model::filename_from_url(url) else {
        return no_filename(url);
    };
    let bytes = match fetch::fetch_async(client, url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(url, error = %e, "fetch failed");
            return FetchOutcome::Failed {
                url: url.to_string(),
                failure: TaskFailure::network(e),
            };
        }
    };
    match storage::write_bytes_async(download_dir, &filename, &bytes).await {
        Ok(()) => FetchOutcome::Completed { filename },
        Err(e) => FetchOutcome::Failed {
            url: url.to_string(),
            failure: TaskFailure::storage(e),
        },
    }
}

fn no_filename(url: &str) -> FetchOutcome {
    FetchOutcome::Failed {
        url: url.to_string(),
        failure: TaskFailure::network("URL has no usable path segment"),
    }
}
