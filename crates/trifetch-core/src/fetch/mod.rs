//! Fetching remote resources into memory.
//!
//! Two clients behind one contract (body bytes or `FetchError`): a
//! libcurl-based blocking fetch for the thread and process strategies, and a
//! reqwest-based async fetch for the cooperative strategy. One attempt per
//! call; retry and caching are out of scope.

mod blocking;
mod nonblocking;

pub use blocking::fetch_blocking;
pub use nonblocking::{build_client, fetch_async};

use std::fmt;
use std::time::Duration;

use crate::config::TrifetchConfig;

/// Per-request limits shared by both clients.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl FetchOptions {
    pub fn from_config(cfg: &TrifetchConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from_config(&TrifetchConfig::default())
    }
}

/// Error from a single fetch attempt. A malformed or unreachable URL ends up
/// here rather than escaping as a transport panic.
#[derive(Debug)]
pub enum FetchError {
    /// libcurl reported an error (timeout, connection, DNS, bad URL).
    Curl(curl::Error),
    /// reqwest reported an error (timeout, connection, DNS, bad URL).
    Request(reqwest::Error),
    /// The response had a non-2xx status; the body was discarded.
    Http(u32),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Request(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Request(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display() {
        assert_eq!(FetchError::Http(404).to_string(), "HTTP 404");
    }

    #[test]
    fn options_follow_config() {
        let cfg = TrifetchConfig {
            connect_timeout_secs: 3,
            request_timeout_secs: 7,
            ..TrifetchConfig::default()
        };
        let opts = FetchOptions::from_config(&cfg);
        assert_eq!(opts.connect_timeout, Duration::from_secs(3));
        assert_eq!(opts.timeout, Duration::from_secs(7));
    }
}
