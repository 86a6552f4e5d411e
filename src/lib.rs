//! ShowFinder - Search TV shows by title and browse their episodes
//!
//! This library provides the fetch, normalize and render pipelines behind the
//! `showfinder` CLI: searching the TVMaze directory, turning its responses
//! into view models, rendering them into a page model, and routing user
//! events on that page back into the pipelines.

mod event_router;
mod markup;
mod page;
mod show_directory;

use thiserror::Error;

// Re-export error types
pub use markup::MarkupError;
pub use show_directory::ShowDirectoryError;

pub use event_router::{DispatchEvent, Event, EventRouter, Outcome};
pub use markup::{
    episodes_area_html, escape_html, render_document, search_form_html, show_entry_html,
    show_list_html, write_document,
};
pub use page::{
    ClickTarget, EPISODES_TRIGGER_LABEL, EntryPart, EpisodeItem, EpisodeList, EpisodesArea, Page,
    SearchForm, ShowEntry, ShowList, render_episodes, render_shows,
};
pub use show_directory::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_URL, Episode, Show, ShowDirectory, TvMazeDirectory,
    episodes_url, search_url,
};

/// Top-level error type for ShowFinder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error while talking to the show directory
    #[error("Show directory error: {0}")]
    ShowDirectory(#[from] ShowDirectoryError),

    /// Error while writing the rendered page
    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
}

/// Searches `directory` for `term` and returns the matching shows.
///
/// # Examples
///
/// ```no_run
/// use showfinder::{search_shows, TvMazeDirectory};
///
/// let shows = search_shows(&TvMazeDirectory::new(), "batman").unwrap();
/// for show in shows {
///     println!("{} ({})", show.name, show.id);
/// }
/// ```
pub fn search_shows<D>(directory: &D, term: &str) -> Result<Vec<Show>, ShowFinderError>
where
    D: ShowDirectory,
{
    Ok(directory.search_shows(term)?)
}

/// Lists the episodes of the show with the given id.
///
/// # Examples
///
/// ```no_run
/// use showfinder::{episodes_for, TvMazeDirectory};
///
/// for episode in episodes_for(&TvMazeDirectory::new(), 169).unwrap() {
///     println!("S{}E{} {}", episode.season, episode.number, episode.name);
/// }
/// ```
pub fn episodes_for<D>(directory: &D, show_id: u64) -> Result<Vec<Episode>, ShowFinderError>
where
    D: ShowDirectory,
{
    Ok(directory.episodes_for(show_id)?)
}
