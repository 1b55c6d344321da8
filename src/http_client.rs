//! Remote fetch layer
//!
//! Scrapers talk to the network only through the [`Fetcher`] trait:
//! - Relative paths are composed against a base URL
//! - Query parameters are appended URL-encoded
//! - Form bodies are sent as `application/x-www-form-urlencoded`
//! - Custom headers are passed per request
//!
//! [`HttpFetcher`] is the reqwest-backed implementation. Retries are not
//! performed here; a failed request surfaces as an error immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Result, ScrapeError};

/// HTTP method of a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

/// Request body of a fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchBody {
    /// Ordered form fields, sent URL-encoded.
    Form(Vec<(String, String)>),
}

/// Per-request options for [`Fetcher::fetch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub base_url: Option<String>,
    pub query: Vec<(String, String)>,
    pub method: Method,
    pub body: Option<FetchBody>,
    pub headers: Vec<(String, String)>,
}

impl FetchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// POST the given fields as a URL-encoded form.
    #[must_use]
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.method = Method::Post;
        self.body = Some(FetchBody::Form(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ));
        self
    }
}

/// Outbound HTTP used by every scraper.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `path` (absolute, or relative to `opts.base_url`) and return the body.
    async fn fetch(&self, path: &str, opts: FetchOptions) -> Result<String>;
}

/// Compose the absolute request URL for `path` under `opts`.
pub fn compose_url(path: &str, opts: &FetchOptions) -> Result<String> {
    let joined = match &opts.base_url {
        Some(base) if !is_absolute(path) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        _ => path.to_string(),
    };

    let mut url = Url::parse(&joined)?;
    if !opts.query.is_empty() {
        url.query_pairs_mut().extend_pairs(&opts.query);
    }
    Ok(url.to_string())
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Encode ordered form fields as `application/x-www-form-urlencoded`.
pub fn encode_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Client construction settings.
#[derive(Debug, Clone)]
pub struct FetcherSettings {
    pub timeout: Duration,
    /// Outbound proxy (`http://`, `https://` or `socks5://`).
    pub upstream_proxy: Option<String>,
    pub user_agent: String,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            upstream_proxy: None,
            user_agent: concat!("sourcer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// reqwest-backed [`Fetcher`].
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&FetcherSettings::default())
    }

    pub fn with_settings(settings: &FetcherSettings) -> Result<Self> {
        let mut builder = Client::builder()
            // Keep connections alive between search, show and AJAX requests
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            // Compression (auto-negotiated via Accept-Encoding)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .user_agent(settings.user_agent.clone())
            .connect_timeout(Duration::from_secs(10))
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            // Some hosts tie the AJAX token to the session cookie
            .cookie_store(true);

        if let Some(proxy) = &settings.upstream_proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self, path, opts), fields(path = %path, method = ?opts.method))]
    async fn fetch(&self, path: &str, opts: FetchOptions) -> Result<String> {
        let url = compose_url(path, &opts)?;
        debug!(%url, "Fetching");

        let mut request = match opts.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        for (name, value) in &opts.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request = match opts.body {
            Some(FetchBody::Form(fields)) => request
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encode_form(&fields)),
            None => request,
        };

        let response = request.send().await?;
        debug!(
            status = %response.status(),
            version = ?response.version(),
            "Response received"
        );

        if !response.status().is_success() {
            return Err(ScrapeError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_relative_path_with_query() {
        let opts = FetchOptions::new()
            .base_url("https://soaper.cc")
            .query("keyword", "Alpha & Omega");
        let url = compose_url("/search.html", &opts).unwrap();
        assert_eq!(url, "https://soaper.cc/search.html?keyword=Alpha+%26+Omega");
    }

    #[test]
    fn absolute_path_ignores_base() {
        let opts = FetchOptions::new().base_url("https://soaper.cc");
        let url = compose_url("https://vidsrc.su/embed/movie/1", &opts).unwrap();
        assert_eq!(url, "https://vidsrc.su/embed/movie/1");
    }

    #[test]
    fn joins_without_double_slash() {
        let opts = FetchOptions::new().base_url("https://soaper.cc/");
        assert_eq!(
            compose_url("movie_1.html", &opts).unwrap(),
            "https://soaper.cc/movie_1.html"
        );
        assert_eq!(
            compose_url("/movie_1.html", &opts).unwrap(),
            "https://soaper.cc/movie_1.html"
        );
    }

    #[test]
    fn relative_path_without_base_is_invalid() {
        let err = compose_url("/search.html", &FetchOptions::new()).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl(_)));
    }

    #[test]
    fn form_sets_post_and_keeps_field_order() {
        let opts = FetchOptions::new().form(&[("pass", "T 1"), ("e2", "0"), ("server", "0")]);
        assert_eq!(opts.method, Method::Post);
        let Some(FetchBody::Form(fields)) = &opts.body else {
            panic!("expected form body");
        };
        assert_eq!(encode_form(fields), "pass=T%201&e2=0&server=0");
    }

    #[test]
    fn builds_default_client() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[test]
    fn rejects_invalid_upstream_proxy() {
        let settings = FetcherSettings {
            upstream_proxy: Some("not a url".to_string()),
            ..FetcherSettings::default()
        };
        assert!(HttpFetcher::with_settings(&settings).is_err());
    }
}
