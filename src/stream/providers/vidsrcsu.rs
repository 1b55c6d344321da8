//! VidSrc (vidsrc.su) source
//!
//! The embed page inlines its server list as script literals:
//!
//! ```text
//! { label: 'Server 3', url: 'https://...' },
//! ... decodeURIComponent('https%3A%2F%2F...') ...
//! ```
//!
//! Servers behind the orbitproxy.ru wrapper carry the real playlist URL
//! base64-encoded in their path; those are rewritten to the M3U8 proxy.

use std::sync::LazyLock;

use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::context::ScrapeContext;
use crate::error::{Result, ScrapeError};
use crate::fingerprint::ClientPlatform;
use crate::http_client::FetchOptions;
use crate::media::MediaQuery;
use crate::proxy::header_map;
use crate::stream::provider::{Embed, Sourcerer, SourcererOutput, StreamFlag};

const EMBED_BASE: &str = "https://vidsrc.su/embed";
const REFERER: &str = "https://pstream.org";
const ORBIT_PROXY_MARKER: &str = "orbitproxy.ru/";
/// Server number given to the `decodeURIComponent` candidate.
const DECODED_SERVER: u32 = 40;
/// Server known to fail on iOS players.
const IOS_BROKEN_SERVER: u32 = 16;

static DECODED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"decodeURIComponent\('([^']+)'\)").expect("decodeURIComponent regex")
});

static SERVER_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"label: 'Server (\d+)', url: '(https.*)'").expect("server literal regex")
});

pub struct VidSrcSuProvider;

/// A numbered playback server.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerCandidate {
    server_number: u32,
    url: String,
}

/// Payload hidden in an orbitproxy path.
#[derive(Debug, Deserialize)]
struct OrbitPayload {
    u: String,
    #[serde(default)]
    o: Option<String>,
    #[serde(default)]
    r: Option<String>,
}

fn embed_url(media: &MediaQuery) -> String {
    match media {
        MediaQuery::Movie { tmdb_id, .. } => format!("{EMBED_BASE}/movie/{tmdb_id}"),
        MediaQuery::Show {
            tmdb_id,
            season,
            episode,
            ..
        } => format!("{EMBED_BASE}/tv/{tmdb_id}/{season}/{episode}"),
    }
}

/// First `decodeURIComponent('...')` literal, percent-decoded.
fn decoded_candidate(page: &str) -> Option<String> {
    let encoded = DECODED_URL.captures(page)?.get(1)?.as_str();
    match urlencoding::decode(encoded) {
        Ok(url) => Some(url.into_owned()),
        Err(e) => {
            warn!(error = %e, "Undecodable decodeURIComponent literal");
            None
        }
    }
}

/// Every `label: 'Server N', url: '...'` literal, in page order.
fn server_candidates(page: &str) -> Vec<ServerCandidate> {
    SERVER_LITERAL
        .captures_iter(page)
        .filter_map(|caps| {
            Some(ServerCandidate {
                server_number: caps[1].parse().ok()?,
                url: caps[2].to_string(),
            })
        })
        .collect()
}

/// Drop servers that are broken on the client platform.
fn filter_for_platform(servers: &mut Vec<ServerCandidate>, platform: ClientPlatform) {
    if platform == ClientPlatform::Ios {
        servers.retain(|s| s.server_number != IOS_BROKEN_SERVER);
    }
}

fn decode_base64(segment: &str) -> Option<Vec<u8>> {
    [STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(segment).ok())
}

/// Decode the payload of an orbitproxy URL, if it is one.
fn decode_orbit_payload(url: &str) -> Option<std::result::Result<OrbitPayload, String>> {
    let (_, rest) = url.split_once(ORBIT_PROXY_MARKER)?;
    let segment = rest.split(".m3u8").next().unwrap_or_default();
    Some(parse_orbit_segment(segment))
}

fn parse_orbit_segment(segment: &str) -> std::result::Result<OrbitPayload, String> {
    let bytes = decode_base64(segment).ok_or("invalid base64")?;
    let text = String::from_utf8(bytes).map_err(|e| e.to_string())?;
    debug!(%text, "Decoded orbitproxy payload");
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

/// Rewrite orbitproxy candidates to the M3U8 proxy; anything else, or
/// anything that fails to decode, passes through unchanged.
fn rewrite_candidate(ctx: &ScrapeContext, server: ServerCandidate) -> ServerCandidate {
    match decode_orbit_payload(&server.url) {
        None => server,
        Some(Ok(payload)) => {
            let headers = header_map([
                ("origin", payload.o.as_deref().unwrap_or_default()),
                ("referer", payload.r.as_deref().unwrap_or_default()),
            ]);
            ServerCandidate {
                url: ctx.proxy_url(&payload.u, &headers),
                ..server
            }
        }
        Some(Err(error)) => {
            warn!(
                server = server.server_number,
                %error,
                "Failed to decode orbitproxy URL, keeping original"
            );
            server
        }
    }
}

impl VidSrcSuProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for VidSrcSuProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sourcerer for VidSrcSuProvider {
    fn id(&self) -> &'static str {
        "vidsrcsu"
    }

    fn name(&self) -> &'static str {
        "VidSrc"
    }

    fn rank(&self) -> u32 {
        250
    }

    fn disabled(&self) -> bool {
        true
    }

    fn flags(&self) -> &'static [StreamFlag] {
        &[StreamFlag::CorsAllowed]
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> Result<SourcererOutput> {
        let page = ctx
            .fetch(
                &embed_url(ctx.media()),
                FetchOptions::new().header("Referer", REFERER),
            )
            .await?;
        ctx.progress(30);

        let extra = decoded_candidate(&page);
        let mut servers = server_candidates(&page);
        debug!(
            servers = servers.len(),
            decoded = extra.is_some(),
            "Scanned embed page"
        );

        filter_for_platform(&mut servers, ctx.platform());
        // Appended after filtering: the decoded candidate is never platform-filtered
        if let Some(url) = extra {
            servers.push(ServerCandidate {
                server_number: DECODED_SERVER,
                url,
            });
        }
        ctx.progress(60);

        if servers.is_empty() {
            return Err(ScrapeError::not_found("No server playlist found"));
        }

        let embeds: Vec<Embed> = servers
            .into_iter()
            .map(|server| rewrite_candidate(ctx, server))
            .map(|server| Embed {
                embed_id: format!("server-{}", server.server_number),
                url: server.url,
            })
            .collect();
        ctx.progress(90);

        info!(embeds = embeds.len(), "Resolved vidsrcsu servers");
        Ok(SourcererOutput {
            embeds,
            stream: vec![],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r"
        <script>
          const servers = [
            { label: 'Server 3', url: 'https://a.example/three.m3u8' },
            { label: 'Server 16', url: 'https://b.example/sixteen.m3u8' },
            { label: 'Server 7', url: 'https://c.example/seven.m3u8' },
          ];
          const peter = decodeURIComponent('https%3A%2F%2Fpeter.example%2Fmaster.m3u8');
        </script>
    ";

    fn orbit_url(payload: &str) -> String {
        format!(
            "https://edge.orbitproxy.ru/{}.m3u8",
            STANDARD.encode(payload.as_bytes())
        )
    }

    #[test]
    fn embed_urls_by_media_type() {
        assert_eq!(
            embed_url(&MediaQuery::movie("Alpha", None, "603")),
            "https://vidsrc.su/embed/movie/603"
        );
        assert_eq!(
            embed_url(&MediaQuery::show("Beta", None, "1399", 2, 5)),
            "https://vidsrc.su/embed/tv/1399/2/5"
        );
    }

    #[test]
    fn extracts_server_literals_in_order() {
        let servers = server_candidates(PAGE);
        let numbers: Vec<u32> = servers.iter().map(|s| s.server_number).collect();
        assert_eq!(numbers, vec![3, 16, 7]);
        assert_eq!(servers[0].url, "https://a.example/three.m3u8");
    }

    #[test]
    fn decodes_uri_component_literal() {
        assert_eq!(
            decoded_candidate(PAGE).as_deref(),
            Some("https://peter.example/master.m3u8")
        );
        assert_eq!(decoded_candidate("no literal here"), None);
    }

    #[test]
    fn ios_drops_only_broken_server() {
        let mut servers = server_candidates(PAGE);
        filter_for_platform(&mut servers, ClientPlatform::Ios);
        let numbers: Vec<u32> = servers.iter().map(|s| s.server_number).collect();
        assert_eq!(numbers, vec![3, 7]);

        let mut servers = server_candidates(PAGE);
        filter_for_platform(&mut servers, ClientPlatform::Android);
        assert_eq!(servers.len(), 3);
    }

    #[test]
    fn decodes_orbit_payload() {
        let url = orbit_url(r#"{"u":"https://x/y.m3u8","o":"https://o","r":"https://r"}"#);
        let payload = decode_orbit_payload(&url).unwrap().unwrap();
        assert_eq!(payload.u, "https://x/y.m3u8");
        assert_eq!(payload.o.as_deref(), Some("https://o"));
        assert_eq!(payload.r.as_deref(), Some("https://r"));
    }

    #[test]
    fn decodes_unpadded_url_safe_payload() {
        let json = r#"{"u":"https://x/a?b=c~"}"#;
        let segment = URL_SAFE_NO_PAD.encode(json.as_bytes());
        let url = format!("https://orbitproxy.ru/{segment}.m3u8");
        let payload = decode_orbit_payload(&url).unwrap().unwrap();
        assert_eq!(payload.u, "https://x/a?b=c~");
        assert_eq!(payload.o, None);
    }

    #[test]
    fn non_orbit_urls_are_not_decoded() {
        assert!(decode_orbit_payload("https://a.example/three.m3u8").is_none());
    }

    #[test]
    fn broken_orbit_payloads_report_errors() {
        assert!(decode_orbit_payload("https://orbitproxy.ru/%%%.m3u8")
            .unwrap()
            .is_err());
        let not_json = orbit_url("plain text");
        assert!(decode_orbit_payload(&not_json).unwrap().is_err());
        let missing_u = orbit_url(r#"{"o":"https://o"}"#);
        assert!(decode_orbit_payload(&missing_u).unwrap().is_err());
    }

    #[test]
    fn provider_is_disabled_by_default() {
        let provider = VidSrcSuProvider::new();
        assert_eq!(provider.id(), "vidsrcsu");
        assert!(provider.disabled());
        assert_eq!(provider.rank(), 250);
    }
}
