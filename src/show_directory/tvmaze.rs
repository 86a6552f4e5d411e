/// TVMaze show directory implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchHit};
use super::{
    Episode, Show, ShowDirectory, ShowDirectoryError, normalize_episodes, normalize_shows,
};
use reqwest::StatusCode;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Public TVMaze API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Builds the show search URL for the given term.
///
/// The term is percent-encoded, so spaces, `&`, `#` and the like end up in
/// the `q` parameter instead of breaking the request line.
pub fn search_url(base_url: &str, term: &str) -> String {
    format!(
        "{}/search/shows?q={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(term)
    )
}

/// Builds the episode list URL for the given show.
pub fn episodes_url(base_url: &str, show_id: u64) -> String {
    format!("{}/shows/{}/episodes", base_url.trim_end_matches('/'), show_id)
}

/// Show directory backed by the TVMaze REST API.
///
/// Uses the `search/shows` endpoint for searches and `shows/{id}/episodes`
/// for episode lists.
pub struct TvMazeDirectory {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeDirectory {
    /// Creates a directory talking to the public TVMaze API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a directory talking to a TVMaze compatible API at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), base_url)
    }

    /// Creates a directory sending its requests through `client`.
    pub fn with_client(client: reqwest::blocking::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The API root this directory sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET request and decodes the JSON body.
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ShowDirectoryError> {
        debug!(url, "Sending request");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ShowDirectoryError::RequestError(e.to_string()))?;

        let response = ensure_success(response)?;

        response
            .json()
            .map_err(|e| ShowDirectoryError::ParseError(e.to_string()))
    }
}

impl Default for TvMazeDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns non-success responses into errors.
fn ensure_success(response: Response) -> Result<Response, ShowDirectoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!(status = status.as_u16(), url = %response.url(), "Request rejected");
    Err(status_error(status))
}

fn status_error(status: StatusCode) -> ShowDirectoryError {
    ShowDirectoryError::HttpStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

impl ShowDirectory for TvMazeDirectory {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, ShowDirectoryError> {
        let url = search_url(&self.base_url, term);
        let hits: Vec<TvMazeSearchHit> = self.get_json(&url)?;

        debug!(term, hits = hits.len(), "Search finished");
        Ok(normalize_shows(hits))
    }

    fn episodes_for(&self, show_id: u64) -> Result<Vec<Episode>, ShowDirectoryError> {
        let url = episodes_url(&self.base_url, show_id);
        let episodes: Vec<TvMazeEpisode> = match self.get_json(&url) {
            Ok(episodes) => episodes,
            Err(ShowDirectoryError::HttpStatus { status: 404, .. }) => {
                return Err(ShowDirectoryError::ShowNotFound(show_id));
            }
            Err(e) => return Err(e),
        };

        debug!(show_id, episodes = episodes.len(), "Episode list fetched");
        Ok(normalize_episodes(episodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    #[test]
    fn test_search_url_plain_term() {
        assert_eq!(
            search_url("https://api.tvmaze.com", "batman"),
            "https://api.tvmaze.com/search/shows?q=batman"
        );
    }

    #[test]
    fn test_search_url_encodes_special_characters() {
        assert_eq!(
            search_url("https://api.tvmaze.com", "law & order #1"),
            "https://api.tvmaze.com/search/shows?q=law%20%26%20order%20%231"
        );
        assert_eq!(
            search_url("https://api.tvmaze.com", ""),
            "https://api.tvmaze.com/search/shows?q="
        );
    }

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        assert_eq!(
            search_url("http://localhost:8080/", "x"),
            "http://localhost:8080/search/shows?q=x"
        );
        assert_eq!(
            episodes_url("http://localhost:8080/", 42),
            "http://localhost:8080/shows/42/episodes"
        );
    }

    #[test]
    fn test_status_error() {
        match status_error(StatusCode::SERVICE_UNAVAILABLE) {
            ShowDirectoryError::HttpStatus { status, reason } => {
                assert_eq!(status, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Directory for a local test server, bypassing any proxy from the environment
    fn local_directory(base_url: impl Into<String>) -> TvMazeDirectory {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        TvMazeDirectory::with_client(client, base_url)
    }

    /// Serves a single HTTP response on a local port.
    ///
    /// Returns the base URL to point the directory at and a handle yielding
    /// the request line the server received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request_line.trim_end().to_string()
        });

        (base_url, handle)
    }

    #[test]
    fn test_search_sends_encoded_term_and_normalizes() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"score": 0.9, "show": {
                "id": 1, "name": "Law & Order", "summary": "<p>Dun dun.</p>", "image": null
            }}]"#,
        );
        let directory = local_directory(base_url.clone());
        assert_eq!(directory.base_url(), base_url);

        let shows = directory.search_shows("law & order #1").unwrap();

        assert_eq!(
            server.join().unwrap(),
            "GET /search/shows?q=law%20%26%20order%20%231 HTTP/1.1"
        );
        assert_eq!(
            shows,
            vec![Show {
                id: 1,
                name: "Law & Order".to_string(),
                summary: "<p>Dun dun.</p>".to_string(),
                image: crate::show_directory::DEFAULT_IMAGE_URL.to_string(),
            }]
        );
    }

    #[test]
    fn test_episodes_are_fetched_for_show() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"id": 1, "name": "Pilot", "season": 1, "number": 1}]"#,
        );
        let directory = local_directory(base_url);

        let episodes = directory.episodes_for(42).unwrap();

        assert_eq!(server.join().unwrap(), "GET /shows/42/episodes HTTP/1.1");
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].season, "1");
        assert_eq!(episodes[0].number, "1");
    }

    #[test]
    fn test_episodes_of_unknown_show() {
        let (base_url, server) = serve_once("404 Not Found", r#"{"name": "Not Found"}"#);
        let directory = local_directory(base_url);

        let result = directory.episodes_for(999);

        server.join().unwrap();
        assert!(matches!(result, Err(ShowDirectoryError::ShowNotFound(999))));
    }

    #[test]
    fn test_search_server_error_is_http_status() {
        let (base_url, server) = serve_once("500 Internal Server Error", "{}");
        let directory = local_directory(base_url);

        let result = directory.search_shows("batman");

        server.join().unwrap();
        assert!(matches!(
            result,
            Err(ShowDirectoryError::HttpStatus { status: 500, .. })
        ));
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let (base_url, server) = serve_once("200 OK", r#"{"unexpected": true}"#);
        let directory = local_directory(base_url);

        let result = directory.search_shows("batman");

        server.join().unwrap();
        assert!(matches!(result, Err(ShowDirectoryError::ParseError(_))));
    }

    #[test]
    fn test_unreachable_host_is_request_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let directory = local_directory(format!("http://127.0.0.1:{}", port));

        assert!(matches!(
            directory.search_shows("batman"),
            Err(ShowDirectoryError::RequestError(_))
        ));
    }
}
