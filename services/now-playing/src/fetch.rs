//!
//! src/fetch.rs  Andrew Belles  Oct 19th, 2026
//!
//! Builds the blocking http client and hits the Deezer search endpoint.
//! Single attempt, no retries: the caller decides what a failure means.
//!

use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use reqwest::{header, redirect};
use serde::Deserialize;
use tracing::debug;

use crate::artwork::TrackSearch;
use crate::config::{DeezerConfig, HttpConfig};
use crate::errors::NowPlayingError;

/// Client building functionality
fn client_helper(http: &HttpConfig) -> ClientBuilder {
    let builder = Client::builder()
        .timeout(http.timeout)
        .connect_timeout(http.connect_timeout)
        .pool_max_idle_per_host(http.pool_max_idle_per_host)
        .pool_idle_timeout(Some(http.pool_idle_timeout))
        .redirect(redirect::Policy::limited(http.max_redirects as usize));

    if http.use_system_proxy { builder } else { builder.no_proxy() }
}

fn client_with_headers_and_agent(
    http: &HttpConfig,
    headers: header::HeaderMap,
    user_agent: &str
) -> Result<Client, NowPlayingError> {
    client_helper(http)
        .default_headers(headers)
        .user_agent(user_agent)
        .build()
        .map_err(|e| NowPlayingError::Http(format!("build client: {e}")))
}

pub fn deezer_client(http: &HttpConfig, cfg: &DeezerConfig) ->
    Result<Client, NowPlayingError> {
    let mut h = header::HeaderMap::new();
    h.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
    client_with_headers_and_agent(http, h, &cfg.user_agent)
}

/// The slice of the search payload we read
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    album: Option<AlbumRef>
}

#[derive(Debug, Deserialize)]
struct AlbumRef {
    cover_medium: Option<String>
}

impl SearchResponse {
    /// album.cover_medium of the first hit (250x250)
    fn first_cover(self) -> Option<String> {
        self.data
            .into_iter()
            .next()
            .and_then(|hit| hit.album)
            .and_then(|album| album.cover_medium)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct DeezerClient {
    pub http: Client,
    pub cfg: DeezerConfig
}

impl DeezerClient {
    pub fn new(http_config: &HttpConfig, cfg: &DeezerConfig) ->
        Result<Self, NowPlayingError> {

        let http = deezer_client(http_config, cfg)?;
        Ok( Self {
            http,
            cfg: cfg.clone()
        })
    }

    /// GET /search?q=...&limit=
    pub fn search(&self, query: &str) -> RequestBuilder {
        self.http.get(self.cfg.search_url.clone()).query(&[
            ("q", query),
            ("limit", &self.cfg.result_limit.to_string())
        ])
    }
}

impl TrackSearch for DeezerClient {
    fn first_cover(&self, query: &str) -> Result<Option<String>, NowPlayingError> {
        let response = self.search(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(NowPlayingError::Http(format!("search returned {status}")));
        }

        let body = response.text()?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let cover = parsed.first_cover();
        debug!(query, found = cover.is_some(), "deezer.search");
        Ok(cover)
    }
}
