//! Media queries supplied by the caller.

use serde::{Deserialize, Serialize};

/// What to resolve: a movie, or one episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MediaQuery {
    #[serde(rename_all = "camelCase")]
    Movie {
        title: String,
        year: Option<u32>,
        tmdb_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Show {
        title: String,
        year: Option<u32>,
        tmdb_id: String,
        season: u32,
        episode: u32,
    },
}

impl MediaQuery {
    pub fn movie(title: impl Into<String>, year: Option<u32>, tmdb_id: impl Into<String>) -> Self {
        Self::Movie {
            title: title.into(),
            year,
            tmdb_id: tmdb_id.into(),
        }
    }

    pub fn show(
        title: impl Into<String>,
        year: Option<u32>,
        tmdb_id: impl Into<String>,
        season: u32,
        episode: u32,
    ) -> Self {
        Self::Show {
            title: title.into(),
            year,
            tmdb_id: tmdb_id.into(),
            season,
            episode,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Movie { title, .. } | Self::Show { title, .. } => title,
        }
    }

    #[must_use]
    pub fn year(&self) -> Option<u32> {
        match self {
            Self::Movie { year, .. } | Self::Show { year, .. } => *year,
        }
    }

    #[must_use]
    pub fn tmdb_id(&self) -> &str {
        match self {
            Self::Movie { tmdb_id, .. } | Self::Show { tmdb_id, .. } => tmdb_id,
        }
    }

    /// `(season, episode)` for show queries.
    #[must_use]
    pub fn episode(&self) -> Option<(u32, u32)> {
        match self {
            Self::Movie { .. } => None,
            Self::Show {
                season, episode, ..
            } => Some((*season, *episode)),
        }
    }

    #[must_use]
    pub fn is_show(&self) -> bool {
        matches!(self, Self::Show { .. })
    }
}
