//! Event routing
//!
//! Maps user events on the page to the search and episode pipelines. Each
//! dispatch runs one fetch, one normalization and one render; a failed fetch
//! leaves the page untouched.

use crate::page::{ClickTarget, Page, render_episodes, render_shows};
use crate::show_directory::{ShowDirectory, ShowDirectoryError};
use tracing::{debug, info};

/// A user event on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search form was submitted with the given term
    SearchSubmitted { term: String },
    /// Something inside the show list was clicked
    Click { target: ClickTarget },
}

/// Progress event emitted while a user event is handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    /// Searching the directory
    Searching { term: String },

    /// Search results rendered into the show list
    ShowsRendered { count: usize },

    /// Fetching the episode list of a show
    FetchingEpisodes { show_id: u64 },

    /// Episode list rendered and episodes area toggled
    EpisodesRendered { count: usize, visible: bool },
}

/// What a dispatch did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The show list was replaced
    ShowsRendered { count: usize },
    /// The episode list was replaced and the episodes area toggled
    EpisodesRendered { show_id: u64, count: usize },
    /// The event has no handler
    Ignored,
}

/// Dispatches page events to the pipelines, using `directory` for lookups.
pub struct EventRouter<D>
where
    D: ShowDirectory,
{
    directory: D,
}

impl<D> EventRouter<D>
where
    D: ShowDirectory,
{
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Handles one event against `page`.
    ///
    /// Clicks are resolved against the show list as it is at dispatch time,
    /// so blocks rendered by later searches are handled like the first ones.
    /// Clicks anywhere but on an "Episodes" control are ignored.
    ///
    /// # Errors
    ///
    /// Directory failures are returned unchanged. Nothing is retried and the
    /// page keeps its previous content.
    pub fn dispatch<F>(
        &self,
        page: &mut Page,
        event: Event,
        mut progress_callback: F,
    ) -> Result<Outcome, ShowDirectoryError>
    where
        F: FnMut(DispatchEvent),
    {
        match event {
            Event::SearchSubmitted { term } => {
                page.search_form.set_term(term);
                self.search_and_display(page, &mut progress_callback)
            }
            Event::Click { target } if target.is_episodes_trigger() => {
                match page.show_list.closest_show_id(&target) {
                    Some(show_id) => {
                        self.episodes_and_display(page, show_id, &mut progress_callback)
                    }
                    None => {
                        debug!(?target, "Click outside of any show block");
                        Ok(Outcome::Ignored)
                    }
                }
            }
            Event::Click { .. } => Ok(Outcome::Ignored),
        }
    }

    /// Searches for the form's current term and renders the result.
    fn search_and_display<F>(
        &self,
        page: &mut Page,
        progress_callback: &mut F,
    ) -> Result<Outcome, ShowDirectoryError>
    where
        F: FnMut(DispatchEvent),
    {
        let term = page.search_form.term().to_string();
        progress_callback(DispatchEvent::Searching { term: term.clone() });

        let shows = self.directory.search_shows(&term)?;

        page.episodes_area.hide();
        render_shows(&mut page.show_list, &shows);

        info!(term = %term, count = shows.len(), "Shows rendered");
        progress_callback(DispatchEvent::ShowsRendered { count: shows.len() });

        Ok(Outcome::ShowsRendered { count: shows.len() })
    }

    /// Fetches the episodes of `show_id` and renders them.
    fn episodes_and_display<F>(
        &self,
        page: &mut Page,
        show_id: u64,
        progress_callback: &mut F,
    ) -> Result<Outcome, ShowDirectoryError>
    where
        F: FnMut(DispatchEvent),
    {
        progress_callback(DispatchEvent::FetchingEpisodes { show_id });

        let episodes = self.directory.episodes_for(show_id)?;

        render_episodes(&mut page.episodes_area, &episodes);

        let visible = page.episodes_area.is_visible();
        info!(show_id, count = episodes.len(), visible, "Episodes rendered");
        progress_callback(DispatchEvent::EpisodesRendered {
            count: episodes.len(),
            visible,
        });

        Ok(Outcome::EpisodesRendered {
            show_id,
            count: episodes.len(),
        })
    }
}
