/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
use serde::Deserialize;
use std::fmt;

/// One hit from the `/search/shows` endpoint.
///
/// The endpoint wraps every show together with its relevance score.
#[derive(Debug, Deserialize)]
pub(crate) struct TvMazeSearchHit {
    /// The matching show
    pub show: TvMazeShow,
}

/// A show as embedded in a search hit.
#[derive(Debug, Deserialize)]
pub(crate) struct TvMazeShow {
    /// Unique TVMaze show id
    pub id: u64,
    /// The name of the TV show
    pub name: String,
    /// Show summary in HTML format (may be null)
    #[serde(default)]
    pub summary: Option<String>,
    /// Artwork links (null when TVMaze has no artwork)
    #[serde(default)]
    pub image: Option<TvMazeImage>,
}

/// Artwork links of a show.
#[derive(Debug, Deserialize)]
pub(crate) struct TvMazeImage {
    /// URL of the medium sized poster
    #[serde(default)]
    pub medium: Option<String>,
}

/// A single episode from the `/shows/{id}/episodes` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TvMazeEpisode {
    /// Unique TVMaze episode id
    pub id: u64,
    /// Episode title (may be null for episodes without a title)
    #[serde(default)]
    pub name: Option<String>,
    /// Season number
    #[serde(default)]
    pub season: TvMazeScalar,
    /// Episode number within the season (null for specials)
    #[serde(default)]
    pub number: TvMazeScalar,
}

/// A JSON scalar that is shown to the user as text.
///
/// TVMaze sends season and episode numbers as integers, but they are only
/// ever displayed, so any scalar is accepted.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum TvMazeScalar {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    #[default]
    Null,
}

impl fmt::Display for TvMazeScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TvMazeScalar::Integer(value) => write!(f, "{}", value),
            TvMazeScalar::Float(value) => write!(f, "{}", value),
            TvMazeScalar::Text(value) => f.write_str(value),
            TvMazeScalar::Bool(value) => write!(f, "{}", value),
            TvMazeScalar::Null => Ok(()),
        }
    }
}
