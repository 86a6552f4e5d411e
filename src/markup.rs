//! HTML output
//!
//! Serializes a [`Page`] into a standalone HTML document. Titles, ids and
//! URLs are escaped. Show summaries already are HTML and are inserted
//! without any sanitization.

use crate::page::{EPISODES_TRIGGER_LABEL, EpisodesArea, Page, SearchForm, ShowEntry, ShowList};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while writing a page to disk
#[derive(Debug, Error)]
pub enum MarkupError {
    /// Failed to write the document
    #[error("Failed to write page to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Markup of the search form.
pub fn search_form_html(form: &SearchForm) -> String {
    format!(
        r#"<form id="searchForm" class="mb-4">
  <input id="searchForm-term" name="term" type="text" value="{}">
  <button type="submit">Go!</button>
</form>
"#,
        escape_html(form.term())
    )
}

/// Markup of a single show block.
pub fn show_entry_html(entry: &ShowEntry) -> String {
    let fallback = escape_html(&entry.image_fallback.replace('\'', "%27"));
    format!(
        r#"<div data-show-id="{id}" class="Show col-md-12 col-lg-6 mb-4">
  <div class="media">
    <img src="{src}" alt="{name}" onerror="this.onerror = null; this.src = '{fallback}'" class="w-25 me-3">
    <div class="media-body">
      <h5 class="text-primary">{name}</h5>
      <div><small>{summary}</small></div>
      <button class="btn btn-outline-light btn-sm Show-getEpisodes">{label}</button>
    </div>
  </div>
</div>
"#,
        id = entry.show_id,
        src = escape_html(&entry.image_src),
        name = escape_html(&entry.name),
        fallback = fallback,
        summary = entry.summary,
        label = EPISODES_TRIGGER_LABEL,
    )
}

/// Markup of the show list container.
pub fn show_list_html(list: &ShowList) -> String {
    let mut html = String::from("<div id=\"showsList\" class=\"row\">\n");
    for entry in list.entries() {
        html.push_str(&show_entry_html(entry));
    }
    html.push_str("</div>\n");
    html
}

/// Markup of the episodes area, hidden with an inline style when not visible.
pub fn episodes_area_html(area: &EpisodesArea) -> String {
    let style = if area.is_visible() {
        ""
    } else {
        r#" style="display: none""#
    };

    let mut html = format!(
        "<section id=\"episodesArea\"{}>\n  <h2>Episodes</h2>\n  <ul id=\"episodesList\">\n",
        style
    );
    for item in area.list().items() {
        html.push_str(&format!(
            "    <li id=\"{}\">{}</li>\n",
            item.id,
            escape_html(&item.text)
        ));
    }
    html.push_str("  </ul>\n</section>\n");
    html
}

/// Serializes the whole page into an HTML document.
pub fn render_document(page: &Page) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>TV Show Search</title>\n</head>\n<body>\n\
         <main class=\"container\">\n<h1>TV Show Search</h1>\n",
    );
    html.push_str(&search_form_html(&page.search_form));
    html.push_str(&show_list_html(&page.show_list));
    html.push_str(&episodes_area_html(&page.episodes_area));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Writes the page as an HTML document to `path`, replacing any existing file.
pub fn write_document(path: &Path, page: &Page) -> Result<(), MarkupError> {
    fs::write(path, render_document(page)).map_err(|e| MarkupError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), "Page written");
    Ok(())
}
