//! `sourcer` - Resolve movies and episodes into playable streams
//!
//! # Features
//!
//! - **Sources**: scrapers for hosting sites that return proxied HLS
//!   playlists with captions, or numbered server embeds
//! - **Pluggable collaborators**: fetcher, title comparator, language
//!   resolver and proxy URL builder are traits with built-in defaults
//! - **Platform aware**: servers broken on a client platform are filtered
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use sourcer::stream::providers::SoaperTvProvider;
//! use sourcer::{HttpFetcher, MediaQuery, ScrapeContext, Sourcerer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let media = MediaQuery::show("Severance", Some(2022), "95396", 1, 3);
//!     let ctx = ScrapeContext::new(media, Arc::new(HttpFetcher::new()?));
//!     let output = SoaperTvProvider::new().scrape(&ctx).await?;
//!     println!("{} streams", output.stream.len());
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod compare;
pub mod config;
pub mod context;
pub mod error;
pub mod fingerprint;
pub mod http_client;
pub mod media;
pub mod proxy;
pub mod stream;

pub use captions::{Caption, CaptionFormat, IsoLanguages, LanguageResolver};
pub use compare::{NormalizedTitleComparator, TitleComparator};
pub use config::{load_config, SourcerConfig};
pub use context::ScrapeContext;
pub use error::{Result, ScrapeError};
pub use fingerprint::{ClientPlatform, DeviceProfile};
pub use http_client::{FetchOptions, Fetcher, HttpFetcher};
pub use media::MediaQuery;
pub use proxy::{M3u8Proxy, ProxyUrlBuilder};
pub use stream::{Embed, Sourcerer, SourcererOutput, Stream, StreamFlag};

/// Version of sourcer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
