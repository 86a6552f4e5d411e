//! Page model
//!
//! This module holds the in-memory page the pipelines render into: the search
//! form, the show list and the episodes area. Render functions take the
//! container they write to as an explicit argument, so every container can be
//! rendered and inspected on its own.

use crate::show_directory::{DEFAULT_IMAGE_URL, Episode, Show};

/// Label of the per-show control that opens the episode list.
pub const EPISODES_TRIGGER_LABEL: &str = "Episodes";

/// The search form and the value of its term input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    term: String,
}

impl SearchForm {
    /// Current value of the term input.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Replaces the value of the term input.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }
}

/// One rendered show block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowEntry {
    /// Show identifier, stored as the block's `data-show-id` attribute
    pub show_id: u64,
    /// Poster source
    pub image_src: String,
    /// Source used when the poster fails to load
    pub image_fallback: String,
    /// Show title
    pub name: String,
    /// Summary markup, trusted verbatim
    pub summary: String,
}

/// Part of a show block a click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPart {
    Block,
    Image,
    Name,
    Summary,
    /// The "Episodes" control
    EpisodesTrigger,
}

/// Where a click on the show list landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the show block at position `entry` of the show list
    Entry { entry: usize, part: EntryPart },
    /// Somewhere in the show list container, outside every show block
    Container,
}

impl ClickTarget {
    /// Click on the "Episodes" control of the given show block.
    pub fn episodes_trigger(entry: usize) -> Self {
        ClickTarget::Entry {
            entry,
            part: EntryPart::EpisodesTrigger,
        }
    }

    /// Whether the click landed on an "Episodes" control.
    pub fn is_episodes_trigger(&self) -> bool {
        matches!(
            self,
            ClickTarget::Entry {
                part: EntryPart::EpisodesTrigger,
                ..
            }
        )
    }
}

/// Container for the rendered show blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowList {
    entries: Vec<ShowEntry>,
}

impl ShowList {
    /// Rendered show blocks in display order.
    pub fn entries(&self) -> &[ShowEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the `data-show-id` of the show block enclosing `target`.
    ///
    /// Returns `None` for clicks outside any block, or for blocks that are no
    /// longer part of the list.
    pub fn closest_show_id(&self, target: &ClickTarget) -> Option<u64> {
        match target {
            ClickTarget::Entry { entry, .. } => self.entries.get(*entry).map(|e| e.show_id),
            ClickTarget::Container => None,
        }
    }
}

/// One rendered episode line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeItem {
    /// Episode identifier the item is keyed by
    pub id: u64,
    /// Display text
    pub text: String,
}

impl EpisodeItem {
    fn from_episode(episode: &Episode) -> Self {
        Self {
            id: episode.id,
            text: format!(
                "{} (season: {}, episode: {})",
                episode.name, episode.season, episode.number
            ),
        }
    }
}

/// The list element inside the episodes area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeList {
    items: Vec<EpisodeItem>,
}

impl EpisodeList {
    pub fn items(&self) -> &[EpisodeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The episodes panel. Starts out hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodesArea {
    visible: bool,
    list: EpisodeList,
}

impl EpisodesArea {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn list(&self) -> &EpisodeList {
        &self.list
    }
}

/// The whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub search_form: SearchForm,
    pub show_list: ShowList,
    pub episodes_area: EpisodesArea,
}

impl Page {
    /// Creates an empty page with the episodes area hidden.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Replaces the content of `list` with one block per show.
pub fn render_shows(list: &mut ShowList, shows: &[Show]) {
    list.entries = shows
        .iter()
        .map(|show| ShowEntry {
            show_id: show.id,
            image_src: show.image.clone(),
            image_fallback: DEFAULT_IMAGE_URL.to_string(),
            name: show.name.clone(),
            summary: show.summary.clone(),
        })
        .collect();
}

/// Replaces the episode list of `area` and flips the area's visibility.
///
/// The flip happens on every call, whatever `episodes` holds.
pub fn render_episodes(area: &mut EpisodesArea, episodes: &[Episode]) {
    area.list.items.clear();
    area.toggle();
    area.list
        .items
        .extend(episodes.iter().map(EpisodeItem::from_episode));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: u64, name: &str, image: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            summary: format!("<p>{}</p>", name),
            image: image.to_string(),
        }
    }

    fn episode(id: u64, name: &str, season: &str, number: &str) -> Episode {
        Episode {
            id,
            name: name.to_string(),
            season: season.to_string(),
            number: number.to_string(),
        }
    }

    #[test]
    fn test_render_shows_empty() {
        let mut list = ShowList::default();
        render_shows(&mut list, &[]);
        assert!(list.is_empty());
    }

    #[test]
    fn test_render_shows_entries() {
        let mut list = ShowList::default();
        render_shows(
            &mut list,
            &[
                show(1, "Batman", "http://x/1.jpg"),
                show(2, "The Batman", DEFAULT_IMAGE_URL),
            ],
        );

        assert_eq!(list.len(), 2);
        let first = &list.entries()[0];
        assert_eq!(first.show_id, 1);
        assert_eq!(first.image_src, "http://x/1.jpg");
        assert_eq!(first.image_fallback, DEFAULT_IMAGE_URL);
        assert_eq!(first.name, "Batman");
        assert_eq!(first.summary, "<p>Batman</p>");
        assert_eq!(list.entries()[1].show_id, 2);
    }

    #[test]
    fn test_render_shows_replaces_previous_entries() {
        let mut list = ShowList::default();
        render_shows(&mut list, &[show(1, "A", "a"), show(2, "B", "b")]);
        render_shows(&mut list, &[show(3, "C", "c")]);

        let ids: Vec<u64> = list.entries().iter().map(|e| e.show_id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_render_episodes_text() {
        let mut area = EpisodesArea::default();
        render_episodes(&mut area, &[episode(1, "Pilot", "1", "1")]);

        assert_eq!(
            area.list().items(),
            &[EpisodeItem {
                id: 1,
                text: "Pilot (season: 1, episode: 1)".to_string(),
            }]
        );
    }

    #[test]
    fn test_render_episodes_twice_toggles_and_does_not_accumulate() {
        let mut area = EpisodesArea::default();
        let episodes = [episode(1, "Pilot", "1", "1"), episode(2, "Second", "1", "2")];

        render_episodes(&mut area, &episodes);
        assert!(area.is_visible());
        assert_eq!(area.list().len(), 2);

        render_episodes(&mut area, &episodes);
        assert!(!area.is_visible());
        assert_eq!(area.list().len(), 2);
    }

    #[test]
    fn test_render_episodes_empty_still_toggles() {
        let mut area = EpisodesArea::default();
        render_episodes(&mut area, &[episode(1, "Pilot", "1", "1")]);
        render_episodes(&mut area, &[]);
        render_episodes(&mut area, &[]);

        assert!(area.is_visible());
        assert!(area.list().is_empty());
    }

    #[test]
    fn test_closest_show_id() {
        let mut list = ShowList::default();
        render_shows(&mut list, &[show(10, "A", "a"), show(20, "B", "b")]);

        assert_eq!(list.closest_show_id(&ClickTarget::episodes_trigger(1)), Some(20));
        assert_eq!(
            list.closest_show_id(&ClickTarget::Entry {
                entry: 0,
                part: EntryPart::Summary
            }),
            Some(10)
        );
        assert_eq!(list.closest_show_id(&ClickTarget::episodes_trigger(5)), None);
        assert_eq!(list.closest_show_id(&ClickTarget::Container), None);
    }

    #[test]
    fn test_is_episodes_trigger() {
        assert!(ClickTarget::episodes_trigger(0).is_episodes_trigger());
        assert!(
            !ClickTarget::Entry {
                entry: 0,
                part: EntryPart::Image
            }
            .is_episodes_trigger()
        );
        assert!(!ClickTarget::Container.is_episodes_trigger());
    }
}
