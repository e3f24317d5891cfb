//! HTTP plumbing shared by the source fetchers.
//!
//! Every fetcher validates its target before any I/O and collapses every
//! failure cause (invalid target, transport error, non-success status, parse
//! error) to `None` at this boundary. Callers only ever observe an
//! undifferentiated no-result signal.

pub mod audio;
pub mod cache;
pub mod dictionary;

use std::io::Read;
use std::time::Duration;

use log::debug;
use url::Url;

/// Builds the blocking HTTP agent shared by all fetchers for one manager.
///
/// `ureq::Agent` is cheap to clone and clones share the connection pool, so
/// each worker thread gets its own handle.
pub fn build_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(5))
        .timeout_read(Duration::from_secs(15))
        .timeout_write(Duration::from_secs(15))
        .build()
}

/// Whether `target` is a fetchable http/https URL.
pub fn is_valid_target(target: &str) -> bool {
    match Url::parse(target) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Appends an encoded query string to `endpoint`.
pub(crate) fn request_url(endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut url = endpoint.trim().trim_end_matches('/').to_string();
    for (index, (key, value)) in params.iter().enumerate() {
        url.push(if index == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(urlencoding::encode(value).as_ref());
    }
    url
}

/// Issues one GET and returns the raw response body.
///
/// Validates the URL first; an invalid target short-circuits without touching
/// the network. Transport failures and non-2xx statuses both yield `None`.
pub(crate) fn fetch_bytes(agent: &ureq::Agent, url: &str) -> Option<Vec<u8>> {
    if !is_valid_target(url) {
        debug!("skipping fetch of invalid target: {url}");
        return None;
    }

    let response = match agent.get(url).call() {
        Ok(response) => response,
        Err(error) => {
            debug!("fetch failed for {url}: {error}");
            return None;
        }
    };

    let mut body = Vec::new();
    if let Err(error) = response.into_reader().read_to_end(&mut body) {
        debug!("failed to read response body for {url}: {error}");
        return None;
    }
    Some(body)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_target, request_url};

    #[test]
    fn test_valid_target_requires_http_scheme_and_host() {
        assert!(is_valid_target("http://dict-co.iciba.com/api/dictionary.php"));
        assert!(is_valid_target("https://res.iciba.com/resource/amp3/1.mp3"));
        assert!(!is_valid_target("ftp://dict-co.iciba.com/word"));
        assert!(!is_valid_target("not a url"));
        assert!(!is_valid_target(""));
    }

    #[test]
    fn test_request_url_encodes_query_values() {
        let url = request_url(
            "http://127.0.0.1:5432/",
            &[("word", "naïve test"), ("type", "json")],
        );
        assert_eq!(url, "http://127.0.0.1:5432?word=na%C3%AFve%20test&type=json");
    }

    #[test]
    fn test_request_url_without_params() {
        assert_eq!(request_url("http://127.0.0.1:5432", &[]), "http://127.0.0.1:5432");
    }
}
