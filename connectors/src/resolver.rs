//! Builds the request URL for a connector from its base URL and stream URL.

use url::Url;

/// Whether `candidate` parses as an absolute URL with a host.
pub fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.has_host())
        .unwrap_or(false)
}

/// Join `base_url` and `stream_url` into one request URL.
///
/// An absolute `stream_url` is returned as-is and `base_url` is ignored.
/// Otherwise trailing slashes of the base and leading slashes of the stream
/// are dropped and the two halves are joined with a single `/`. Nothing is
/// encoded or normalized.
pub fn resolve(base_url: &str, stream_url: &str) -> String {
    if is_absolute_url(stream_url) {
        return stream_url.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        stream_url.trim_start_matches('/')
    )
}
