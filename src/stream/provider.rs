//! Source trait and common output types.
//!
//! A [`Sourcerer`] knows how to turn a [`MediaQuery`](crate::MediaQuery)
//! into playable streams or embeds for one specific hosting site. Every
//! source returns the same [`SourcererOutput`] shape.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::captions::Caption;
use crate::context::ScrapeContext;
use crate::error::Result;

/// Capability flags of a stream or source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamFlag {
    /// Playable from a browser without further CORS workarounds.
    CorsAllowed,
}

/// Manifest kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Hls,
}

/// A playable manifest with its captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// `"primary"`, `"backup"`, ...
    pub id: String,
    /// Absolute playlist URL.
    pub playlist: String,
    #[serde(rename = "type")]
    pub kind: StreamType,
    /// How many levels of the playlist are proxied (2 = variant + media playlists).
    pub proxy_depth: u8,
    pub flags: BTreeSet<StreamFlag>,
    pub captions: Vec<Caption>,
}

/// Reference to a further source the caller resolves separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embed {
    pub embed_id: String,
    pub url: String,
}

/// Uniform result of a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcererOutput {
    pub embeds: Vec<Embed>,
    pub stream: Vec<Stream>,
}

/// Trait for hosting-site sources.
#[async_trait]
pub trait Sourcerer: Send + Sync {
    /// Short lowercase source id (e.g., `"soapertv"`).
    fn id(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Higher ranks are tried first by callers that rank sources.
    fn rank(&self) -> u32;

    /// Disabled sources still work when invoked explicitly.
    fn disabled(&self) -> bool {
        false
    }

    fn flags(&self) -> &'static [StreamFlag];

    /// Resolve the context's media query.
    async fn scrape(&self, ctx: &ScrapeContext) -> Result<SourcererOutput>;
}
