//! Per-query scrape context.
//!
//! A [`ScrapeContext`] bundles the media query with the collaborators a
//! scraper needs (fetcher, title comparator, language resolver, proxy
//! builder) and the client platform. It is built once per query and
//! never shared between queries.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::captions::{IsoLanguages, LanguageResolver};
use crate::compare::{NormalizedTitleComparator, TitleComparator};
use crate::error::Result;
use crate::fingerprint::ClientPlatform;
use crate::http_client::{FetchOptions, Fetcher};
use crate::media::MediaQuery;
use crate::proxy::{M3u8Proxy, ProxyUrlBuilder};

/// Callback receiving progress percentages (0-100).
pub type ProgressCallback = Box<dyn Fn(u8) + Send + Sync>;

pub struct ScrapeContext {
    media: MediaQuery,
    platform: ClientPlatform,
    fetcher: Arc<dyn Fetcher>,
    comparator: Arc<dyn TitleComparator>,
    languages: Arc<dyn LanguageResolver>,
    proxy: Arc<dyn ProxyUrlBuilder>,
    progress: Option<ProgressCallback>,
    last_progress: AtomicU8,
}

impl ScrapeContext {
    /// Context with the default comparator, language table and M3U8 proxy.
    pub fn new(media: MediaQuery, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            media,
            platform: ClientPlatform::default(),
            fetcher,
            comparator: Arc::new(NormalizedTitleComparator),
            languages: Arc::new(IsoLanguages),
            proxy: Arc::new(M3u8Proxy::default()),
            progress: None,
            last_progress: AtomicU8::new(0),
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: ClientPlatform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_comparator(mut self, comparator: Arc<dyn TitleComparator>) -> Self {
        self.comparator = comparator;
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: Arc<dyn LanguageResolver>) -> Self {
        self.languages = languages;
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: Arc<dyn ProxyUrlBuilder>) -> Self {
        self.proxy = proxy;
        self
    }

    #[must_use]
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    #[must_use]
    pub fn media(&self) -> &MediaQuery {
        &self.media
    }

    #[must_use]
    pub fn platform(&self) -> ClientPlatform {
        self.platform
    }

    pub async fn fetch(&self, path: &str, opts: FetchOptions) -> Result<String> {
        self.fetcher.fetch(path, opts).await
    }

    /// Does a scraped title/year refer to the queried media?
    #[must_use]
    pub fn matches_title(&self, title: &str, year: Option<u32>) -> bool {
        self.comparator.matches(&self.media, title, year)
    }

    #[must_use]
    pub fn language_code(&self, label: &str) -> Option<String> {
        self.languages.label_to_code(label)
    }

    #[must_use]
    pub fn proxy_url(&self, target: &str, headers: &BTreeMap<String, String>) -> String {
        self.proxy.build(target, headers)
    }

    /// Report progress. Values not above the last reported one are dropped.
    pub fn progress(&self, percent: u8) {
        let percent = percent.min(100);
        let previous = self.last_progress.fetch_max(percent, Ordering::Relaxed);
        if percent > previous {
            if let Some(cb) = &self.progress {
                cb(percent);
            }
        }
    }
}
