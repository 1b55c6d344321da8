//! Scrape pipeline errors.
//!
//! Two tiers exist: query-level failures are returned as [`ScrapeError`],
//! item-level failures (a bad subtitle entry, an undecodable server URL)
//! never reach this type and are handled where they occur.

use thiserror::Error;

/// Query-level scrape errors
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Content, episode, token or usable candidate could not be located.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Selector error: {0}")]
    Selector(String),
}

impl ScrapeError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound(reason.into())
    }

    /// Returns `true` for the terminal "nothing to play here" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        let err = ScrapeError::not_found("Content not found");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Content not found");
    }

    #[test]
    fn json_errors_become_malformed_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: ScrapeError = json_err.into();
        assert!(matches!(err, ScrapeError::MalformedResponse(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn status_error_names_url() {
        let err = ScrapeError::Status {
            status: 503,
            url: "https://soaper.cc/search.html".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from https://soaper.cc/search.html");
    }
}
