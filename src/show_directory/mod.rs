/// Data structures and traits for looking up shows in a show directory.
///
/// This module provides the view models the rest of the crate renders
/// (`Show` and `Episode`), the normalization from raw TVMaze records into
/// those models, and the trait implemented by directory backends.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::{DEFAULT_BASE_URL, TvMazeDirectory, episodes_url, search_url};

use thiserror::Error;
use tvmaze_types::{TvMazeEpisode, TvMazeSearchHit};

/// Artwork shown for shows without a poster, or whose poster fails to load.
pub const DEFAULT_IMAGE_URL: &str = "https://store-images.s-microsoft.com/image/apps.65316.13510798887490672.6e1ebb25-96c8-4504-b714-1f7cbca3c5ad.f9514a23-1eb8-4916-a18e-99b1a9817d15?mode=scale&q=90&h=300&w=300";

/// Errors that can occur while talking to a show directory.
#[derive(Debug, Error)]
pub enum ShowDirectoryError {
    /// The request could not be sent or no response was received
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The directory answered with a non-success status
    #[error("HTTP {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Failed to parse the directory's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested show does not exist
    #[error("Show not found: {0}")]
    ShowNotFound(u64),
}

/// A show as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    /// Unique show identifier
    pub id: u64,
    /// The show title
    pub name: String,
    /// Summary markup, passed through untouched
    pub summary: String,
    /// Poster URL, never empty
    pub image: String,
}

/// A single episode as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Unique episode identifier
    pub id: u64,
    /// The episode title
    pub name: String,
    /// Season number as text
    pub season: String,
    /// Episode number within the season as text
    pub number: String,
}

/// Trait for directories that can search shows and list their episodes.
///
/// Every call performs exactly one request. Implementors must not retry and
/// must not hand back partial results: the caller either receives the full
/// list or an error.
pub trait ShowDirectory {
    /// Searches for shows matching the given term.
    ///
    /// The term is passed on as-is; the directory decides what an empty or
    /// very short term matches. Results keep the directory's relevance order.
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, ShowDirectoryError>;

    /// Lists all episodes of the given show in the directory's order.
    fn episodes_for(&self, show_id: u64) -> Result<Vec<Episode>, ShowDirectoryError>;
}

/// Converts search hits into shows, keeping their order.
///
/// Hits without a usable poster get [`DEFAULT_IMAGE_URL`].
pub(crate) fn normalize_shows(hits: Vec<TvMazeSearchHit>) -> Vec<Show> {
    hits.into_iter()
        .map(|hit| {
            let show = hit.show;
            let image = show
                .image
                .and_then(|image| image.medium)
                .filter(|medium| !medium.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

            Show {
                id: show.id,
                name: show.name,
                summary: show.summary.unwrap_or_default(),
                image,
            }
        })
        .collect()
}

/// Converts raw episodes into episodes, keeping their order.
pub(crate) fn normalize_episodes(episodes: Vec<TvMazeEpisode>) -> Vec<Episode> {
    episodes
        .into_iter()
        .map(|episode| Episode {
            id: episode.id,
            name: episode.name.unwrap_or_default(),
            season: episode.season.to_string(),
            number: episode.number.to_string(),
        })
        .collect()
}
