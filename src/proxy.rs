//! M3U8 proxy URL construction.
//!
//! Playlists served by anti-bot sites need headers (referer, user agent)
//! that a browser player cannot send cross-origin. The proxy receives the
//! upstream URL and the header bundle as query parameters and replays them.

use std::collections::BTreeMap;

/// Default public M3U8 proxy.
pub const DEFAULT_PROXY_URL: &str = "https://proxy.fithwit.net";

/// Wraps a target URL so that it is fetched through a header-injecting proxy.
pub trait ProxyUrlBuilder: Send + Sync {
    fn build(&self, target: &str, headers: &BTreeMap<String, String>) -> String;
}

/// `{base}/m3u8-proxy?url=..&headers=..` proxy.
#[derive(Debug, Clone)]
pub struct M3u8Proxy {
    base_url: String,
}

impl M3u8Proxy {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for M3u8Proxy {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_URL)
    }
}

impl ProxyUrlBuilder for M3u8Proxy {
    fn build(&self, target: &str, headers: &BTreeMap<String, String>) -> String {
        let mut url = format!(
            "{}/m3u8-proxy?url={}",
            self.base_url,
            urlencoding::encode(target)
        );
        if !headers.is_empty() {
            // BTreeMap serialization cannot fail
            let json = serde_json::to_string(headers).unwrap_or_default();
            url.push_str("&headers=");
            url.push_str(&urlencoding::encode(&json));
        }
        url
    }
}

/// Build a header map from borrowed pairs.
pub fn header_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
