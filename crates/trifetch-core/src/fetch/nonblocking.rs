//! Async GET via reqwest for the cooperative strategy.

use super::{FetchError, FetchOptions};

/// Builds the shared async client with the same limits the blocking fetch
/// uses. One client serves every task in a cooperative run.
pub fn build_client(opts: &FetchOptions) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(opts.connect_timeout)
        .timeout(opts.timeout)
        .build()
}

/// Downloads `url` and returns the body bytes. Suspends at the network
/// boundary instead of blocking, so sibling tasks on the same thread keep
/// making progress.
pub async fn fetch_async(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await.map_err(FetchError::Request)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http(u32::from(status.as_u16())));
    }
    let bytes = response.bytes().await.map_err(FetchError::Request)?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connection_refused_is_an_error_value() {
        let client = build_client(&FetchOptions::default()).unwrap();
        let err = fetch_async(&client, "http://127.0.0.1:1/a.png")
            .await
            .expect_err("no server on port 1");
        assert!(matches!(err, FetchError::Request(_)));
    }

    #[tokio::test]
    async fn malformed_url_is_an_error_value() {
        let client = build_client(&FetchOptions::default()).unwrap();
        let err = fetch_async(&client, "not a url")
            .await
            .expect_err("unparseable URL");
        assert!(matches!(err, FetchError::Request(_)));
    }
}
