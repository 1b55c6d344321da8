//! Soaper (soaper.cc) source
//!
//! Flow: search listing → title page → (season block → episode page) →
//! hidden `pass` token → AJAX info endpoint → proxied HLS playlists.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::{debug, info};

use crate::captions::{Caption, CaptionFormat};
use crate::context::ScrapeContext;
use crate::error::{Result, ScrapeError};
use crate::fingerprint::DeviceProfile;
use crate::http_client::FetchOptions;
use crate::stream::provider::{Sourcerer, SourcererOutput, Stream, StreamFlag, StreamType};

const BASE_URL: &str = "https://soaper.cc";
const EPISODE_INFO_ENDPOINT: &str = "/home/index/getEInfoAjax";
const MOVIE_INFO_ENDPOINT: &str = "/home/index/getMInfoAjax";

pub struct SoaperTvProvider;

/// One entry of the search listing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchResult {
    title: String,
    year: Option<u32>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    val: String,
    /// Falsy non-string values (`false`, `0`) are sent when there is no backup.
    #[serde(default)]
    val_bak: Option<serde_json::Value>,
    #[serde(default)]
    subs: Option<serde_json::Value>,
}

impl InfoResponse {
    fn backup(&self) -> Option<&str> {
        self.val_bak
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .filter(|v| !v.is_empty())
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{e:?}")))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Integer prefix of `text` (leading whitespace allowed), like `parseInt`.
fn leading_int(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Absolute site URL for a site-relative path.
fn site_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{BASE_URL}/{}", path.trim_start_matches('/'))
    }
}

/// Parse `.thumbnail` entries; entries without title or link are skipped.
fn parse_search_results(html: &str) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let thumbnail = selector(".thumbnail")?;
    let title_link = selector("h5 a")?;
    let year_tip = selector(".img-tip")?;

    let mut results = Vec::new();
    for entry in document.select(&thumbnail) {
        let Some(link) = entry.select(&title_link).next() else {
            continue;
        };
        let title = element_text(link);
        let url = link.value().attr("href").unwrap_or_default().trim();
        if title.is_empty() || url.is_empty() {
            continue;
        }
        let year = entry
            .select(&year_tip)
            .next()
            .map(element_text)
            .and_then(|y| leading_int(&y));

        results.push(SearchResult {
            title,
            year,
            url: url.to_string(),
        });
    }
    Ok(results)
}

/// `"Season1 : 2019"` → `"Season1"`.
fn season_label(heading: &str) -> &str {
    heading.trim().split(':').next().unwrap_or_default().trim()
}

/// Find the episode page link on a show page.
///
/// Season blocks are the parents of `h4` headings labelled `Season{N}`;
/// episode links inside them read `"{episode}.Title"`.
fn find_episode_link(html: &str, season: u32, episode: u32) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let heading = selector("h4")?;
    let link = selector("a")?;
    let wanted = format!("Season{season}");

    let blocks: Vec<ElementRef<'_>> = document
        .select(&heading)
        .filter(|h| season_label(&h.text().collect::<String>()) == wanted)
        .filter_map(|h| h.parent().and_then(ElementRef::wrap))
        .collect();
    if blocks.is_empty() {
        debug!(%wanted, "No season block");
        return Ok(None);
    }

    let episode_link = blocks.iter().flat_map(|b| b.select(&link)).find(|a| {
        let text = a.text().collect::<String>();
        leading_int(text.split('.').next().unwrap_or_default()) == Some(episode)
    });

    Ok(episode_link
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string))
}

/// Hidden `#hId` token required by the info endpoint.
fn extract_pass(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let hidden = selector("#hId")?;
    Ok(document
        .select(&hidden)
        .next()
        .and_then(|el| el.value().attr("value"))
        .filter(|v| !v.is_empty())
        .map(str::to_string))
}

/// Language code for a subtitle name.
///
/// Names come as `<Language>.srt`, `<code>:hi` or a bare `<code>`.
fn subtitle_language(name: &str, label_to_code: impl Fn(&str) -> Option<String>) -> Option<String> {
    let code = if let Some((label, _)) = name.split_once(".srt") {
        label_to_code(label)
    } else if let Some((code, _)) = name.split_once(':') {
        Some(code.to_string())
    } else {
        Some(name.to_string())
    };
    code.filter(|c| !c.is_empty())
}

fn parse_captions(subs: Option<&serde_json::Value>, ctx: &ScrapeContext) -> Vec<Caption> {
    let Some(entries) = subs.and_then(serde_json::Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|sub| {
            let name = sub.get("name")?.as_str()?;
            let path = sub.get("path")?.as_str()?;
            let Some(language) = subtitle_language(name, |label| ctx.language_code(label)) else {
                debug!(name, "Dropping subtitle with unresolved language");
                return None;
            };
            Some(Caption {
                id: path.to_string(),
                url: site_url(path),
                format: CaptionFormat::Srt,
                has_cors_restrictions: false,
                language,
            })
        })
        .collect()
}

impl SoaperTvProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Search, match and (for shows) navigate to the episode page.
    async fn locate_content(ctx: &ScrapeContext) -> Result<String> {
        let media = ctx.media();
        let listing = ctx
            .fetch(
                "/search.html",
                FetchOptions::new()
                    .base_url(BASE_URL)
                    .query("keyword", media.title()),
            )
            .await?;

        let results = parse_search_results(&listing)?;
        debug!(count = results.len(), "Parsed search results");

        let show_link = results
            .into_iter()
            .find(|r| ctx.matches_title(&r.title, r.year))
            .map(|r| r.url)
            .ok_or_else(|| ScrapeError::not_found("Content not found"))?;

        let Some((season, episode)) = media.episode() else {
            return Ok(show_link);
        };

        let show_page = ctx
            .fetch(&show_link, FetchOptions::new().base_url(BASE_URL))
            .await?;
        find_episode_link(&show_page, season, episode)?.ok_or_else(|| {
            ScrapeError::not_found(format!("Season {season} episode {episode} not found"))
        })
    }

    async fn resolve_manifest(ctx: &ScrapeContext, content_page: &str) -> Result<InfoResponse> {
        let page = ctx
            .fetch(content_page, FetchOptions::new().base_url(BASE_URL))
            .await?;
        let pass = extract_pass(&page)?.ok_or_else(|| ScrapeError::not_found("Content not found"))?;
        ctx.progress(50);

        let endpoint = if ctx.media().is_show() {
            EPISODE_INFO_ENDPOINT
        } else {
            MOVIE_INFO_ENDPOINT
        };
        let body = ctx
            .fetch(
                endpoint,
                FetchOptions::new()
                    .base_url(BASE_URL)
                    .form(&[("pass", pass.as_str()), ("e2", "0"), ("server", "0")])
                    .header("referer", &site_url(content_page))
                    .headers(DeviceProfile::iphone_safari().header_pairs()),
            )
            .await?;

        Ok(serde_json::from_str(&body)?)
    }

    fn normalize(ctx: &ScrapeContext, content_page: &str, info: &InfoResponse) -> SourcererOutput {
        let captions = parse_captions(info.subs.as_ref(), ctx);
        ctx.progress(90);

        let mut headers = BTreeMap::from([("referer".to_string(), site_url(content_page))]);
        headers.extend(DeviceProfile::iphone_safari().header_pairs());

        let make_stream = |id: &str, path: &str| Stream {
            id: id.to_string(),
            playlist: ctx.proxy_url(&site_url(path), &headers),
            kind: StreamType::Hls,
            proxy_depth: 2,
            flags: BTreeSet::from([StreamFlag::CorsAllowed]),
            captions: captions.clone(),
        };

        let mut stream = vec![make_stream("primary", &info.val)];
        if let Some(backup) = info.backup() {
            stream.push(make_stream("backup", backup));
        }

        SourcererOutput {
            embeds: vec![],
            stream,
        }
    }
}

impl Default for SoaperTvProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sourcerer for SoaperTvProvider {
    fn id(&self) -> &'static str {
        "soapertv"
    }

    fn name(&self) -> &'static str {
        "S4MJ"
    }

    fn rank(&self) -> u32 {
        236
    }

    fn flags(&self) -> &'static [StreamFlag] {
        &[StreamFlag::CorsAllowed]
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<SourcererOutput> {
        let content_page = Self::locate_content(ctx).await?;
        debug!(%content_page, "Located content page");

        let info = Self::resolve_manifest(ctx, &content_page).await?;
        let output = Self::normalize(ctx, &content_page, &info);

        info!(
            streams = output.stream.len(),
            captions = output.stream.first().map_or(0, |s| s.captions.len()),
            "Resolved soapertv streams"
        );
        Ok(output)
    }
}
