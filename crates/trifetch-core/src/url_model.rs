//! Filename derivation from URL path.

/// Derives the local filename for a URL: its last non-empty path segment,
/// used verbatim. Distinct URLs sharing a tail segment map to the same file
/// and silently overwrite each other (last writer wins).
///
/// Returns `None` if the URL cannot be parsed or the path has no usable
/// segment (root, `.`, `..`).
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            filename_from_url("https://example.com/a/b/photo.png").as_deref(),
            Some("photo.png")
        );
        assert_eq!(
            filename_from_url("https://example.com/single").as_deref(),
            Some("single")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(filename_from_url("https://example.com/"), None);
        assert_eq!(filename_from_url("https://example.com"), None);
        assert_eq!(filename_from_url("not a url"), None);
    }

    #[test]
    fn with_query() {
        assert_eq!(
            filename_from_url("https://example.com/img.jpg?token=abc").as_deref(),
            Some("img.jpg")
        );
    }

    #[test]
    fn dot_segments_rejected() {
        assert_eq!(filename_from_url("https://example.com/x/."), None);
        assert_eq!(filename_from_url("https://example.com/x/.."), None);
    }

    #[test]
    fn same_tail_different_hosts_collide() {
        let a = filename_from_url("http://x.test/d/a.png");
        let b = filename_from_url("http://y.test/e/a.png");
        assert_eq!(a.as_deref(), Some("a.png"));
        assert_eq!(a, b);
    }
}
