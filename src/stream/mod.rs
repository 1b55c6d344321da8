//! Stream sources for sourcer
//!
//! Each source scrapes one hosting site and returns proxied HLS streams
//! (with captions) or embeds for further resolution.

pub mod provider;
pub mod providers;

pub use provider::{Embed, Sourcerer, SourcererOutput, Stream, StreamFlag, StreamType};
