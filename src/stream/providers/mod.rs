//! Hosting-site sources

pub mod soapertv;
pub mod vidsrcsu;

pub use soapertv::SoaperTvProvider;
pub use vidsrcsu::VidSrcSuProvider;

use super::provider::Sourcerer;

/// Every known source, disabled ones included.
#[must_use]
pub fn all() -> Vec<Box<dyn Sourcerer>> {
    vec![
        Box::new(SoaperTvProvider::new()),
        Box::new(VidSrcSuProvider::new()),
    ]
}

/// Look up a source by id (case-insensitive).
#[must_use]
pub fn find(id: &str) -> Option<Box<dyn Sourcerer>> {
    all()
        .into_iter()
        .find(|source| source.id().eq_ignore_ascii_case(id.trim()))
}
