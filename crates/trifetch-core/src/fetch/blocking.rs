//! Blocking GET via libcurl, buffering the body in memory.

use super::{FetchError, FetchOptions};

/// Downloads `url` with a single GET and returns the body bytes.
///
/// Follows redirects (up to 10). Blocks the calling thread until the
/// response completes or errors; the thread and process strategies rely on
/// exactly that.
pub fn fetch_blocking(url: &str, opts: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.max_redirections(10).map_err(FetchError::Curl)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(FetchError::Curl)?;
    easy.timeout(opts.timeout).map_err(FetchError::Curl)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(FetchError::Curl)?;
        transfer.perform().map_err(FetchError::Curl)?;
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_refused_is_an_error_value() {
        // Port 1 is never listening; the failure must come back as data.
        let err = fetch_blocking("http://127.0.0.1:1/a.png", &FetchOptions::default())
            .expect_err("no server on port 1");
        assert!(matches!(err, FetchError::Curl(_)));
    }
}
