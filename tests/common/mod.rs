//! Shared fixtures: a scripted in-memory fetcher that records requests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sourcer::http_client::{compose_url, FetchOptions, Fetcher};
use sourcer::{MediaQuery, Result, ScrapeContext, ScrapeError};

/// A request seen by [`ScriptedFetcher`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub opts: FetchOptions,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.opts
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Answers requests from a fixed URL → body table; unknown URLs get a 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Vec<(String, String)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for the absolute URL `url` (query string included).
    pub fn route(mut self, url: &str, body: &str) -> Self {
        self.routes.push((url.to_string(), body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, path: &str, opts: FetchOptions) -> Result<String> {
        let url = compose_url(path, &opts)?;
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.clone(),
            opts,
        });
        self.routes
            .iter()
            .find(|(route, _)| *route == url)
            .map(|(_, body)| body.clone())
            .ok_or(ScrapeError::Status { status: 404, url })
    }
}

/// Context over a shared scripted fetcher, with a progress recorder.
pub fn context(media: MediaQuery, fetcher: &Arc<ScriptedFetcher>) -> (ScrapeContext, Arc<Mutex<Vec<u8>>>) {
    let progress = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&progress);
    let fetcher: Arc<dyn Fetcher> = fetcher.clone();
    let ctx = ScrapeContext::new(media, fetcher)
        .on_progress(Box::new(move |p| sink.lock().unwrap().push(p)));
    (ctx, progress)
}

/// Decoded value of query parameter `name` in `url`.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// The `headers` proxy parameter as JSON.
pub fn proxy_headers(url: &str) -> serde_json::Value {
    serde_json::from_str(&query_param(url, "headers").expect("headers param")).unwrap()
}
