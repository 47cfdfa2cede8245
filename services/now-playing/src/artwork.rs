//!
//! src/artwork.rs  Andrew Belles  Oct 19th, 2026
//!
//! Best-effort album art lookup with a per-process memo. A lookup never
//! fails from the caller's point of view, it just comes back empty.
//!

use std::collections::HashMap;

use tracing::debug;

use crate::errors::NowPlayingError;
use crate::types::TrackQuery;

/// Anything that can turn free text into the first hit's cover url
pub trait TrackSearch {
    fn first_cover(&self, query: &str) -> Result<Option<String>, NowPlayingError>;
}

/// No client could be built: every lookup fails and is absorbed as usual
impl<T: TrackSearch> TrackSearch for Option<T> {
    fn first_cover(&self, query: &str) -> Result<Option<String>, NowPlayingError> {
        match self {
            Some(search) => search.first_cover(query),
            None => Err(NowPlayingError::Http("no search client".to_string()))
        }
    }
}

/// "song|artist" -> resolved cover. Misses are remembered too.
#[derive(Debug, Default)]
pub struct ArtworkCache {
    entries: HashMap<String, Option<String>>
}

impl ArtworkCache {
    pub fn new() -> Self { Self::default() }

    /// Outer None: never asked. Inner None: asked, nothing found.
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, cover: Option<String>) {
        self.entries.insert(key, cover);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize { self.entries.len() }
}

pub struct ArtworkResolver<S: TrackSearch> {
    search: S,
    cache: ArtworkCache
}

impl<S: TrackSearch> ArtworkResolver<S> {
    pub fn new(search: S) -> Self {
        Self { search, cache: ArtworkCache::new() }
    }

    #[cfg(test)]
    pub fn cache(&self) -> &ArtworkCache { &self.cache }

    #[tracing::instrument(skip(self, track), fields(song = %track.song, artist = %track.artist))]
    pub fn resolve(&mut self, track: &TrackQuery) -> Option<String> {
        let key = track.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            debug!(cached = hit.is_some(), "artwork.cache_hit");
            return hit;
        }

        let cover = match self.search.first_cover(&track.search_text()) {
            Ok(cover) => cover,
            Err(e) => {
                debug!(error = %e, "artwork.lookup_failed");
                None
            }
        };

        self.cache.insert(key, cover.clone());
        cover
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Records every query and replays a fixed answer
    struct CountingSearch {
        calls: Cell<usize>,
        queries: RefCell<Vec<String>>,
        answer: fn() -> Result<Option<String>, NowPlayingError>
    }

    impl CountingSearch {
        fn new(answer: fn() -> Result<Option<String>, NowPlayingError>) -> Self {
            Self { calls: Cell::new(0), queries: RefCell::new(Vec::new()), answer }
        }
    }

    impl TrackSearch for &CountingSearch {
        fn first_cover(&self, query: &str) -> Result<Option<String>, NowPlayingError> {
            self.calls.set(self.calls.get() + 1);
            self.queries.borrow_mut().push(query.to_string());
            (self.answer)()
        }
    }

    fn found() -> Result<Option<String>, NowPlayingError> {
        Ok(Some("https://cdn/250.jpg".to_string()))
    }

    fn missing() -> Result<Option<String>, NowPlayingError> { Ok(None) }

    fn offline() -> Result<Option<String>, NowPlayingError> {
        Err(NowPlayingError::Http("connection refused".to_string()))
    }

    #[test]
    fn same_pair_hits_the_network_once() {
        let search = CountingSearch::new(found);
        let mut resolver = ArtworkResolver::new(&search);
        let track = TrackQuery::new("Song", "Artist");

        let first = resolver.resolve(&track);
        let second = resolver.resolve(&track);

        assert_eq!(first.as_deref(), Some("https://cdn/250.jpg"));
        assert_eq!(first, second);
        assert_eq!(search.calls.get(), 1);
        assert_eq!(*search.queries.borrow(), vec!["Song Artist".to_string()]);
    }

    #[test]
    fn misses_are_cached_as_well() {
        let search = CountingSearch::new(missing);
        let mut resolver = ArtworkResolver::new(&search);
        let track = TrackQuery::new("Obscure", "Nobody");

        assert_eq!(resolver.resolve(&track), None);
        assert_eq!(resolver.resolve(&track), None);
        assert_eq!(search.calls.get(), 1);
        assert_eq!(resolver.cache().get("Obscure|Nobody"), Some(None));
    }

    #[test]
    fn failures_come_back_as_none() {
        let search = CountingSearch::new(offline);
        let mut resolver = ArtworkResolver::new(&search);

        assert_eq!(resolver.resolve(&TrackQuery::new("Song", "Artist")), None);
        assert_eq!(resolver.resolve(&TrackQuery::new("Song", "Artist")), None);
        assert_eq!(search.calls.get(), 1);
    }

    #[test]
    fn missing_client_resolves_to_none() {
        let mut resolver = ArtworkResolver::new(None::<&CountingSearch>);
        assert_eq!(resolver.resolve(&TrackQuery::new("Song", "Artist")), None);
        assert_eq!(resolver.cache().get("Song|Artist"), Some(None));

        let search = CountingSearch::new(found);
        let mut resolver = ArtworkResolver::new(Some(&search));
        assert!(resolver.resolve(&TrackQuery::new("Song", "Artist")).is_some());
        assert_eq!(search.calls.get(), 1);
    }

    #[test]
    fn different_pairs_are_looked_up_separately() {
        let search = CountingSearch::new(found);
        let mut resolver = ArtworkResolver::new(&search);

        resolver.resolve(&TrackQuery::new("Song", "Artist"));
        resolver.resolve(&TrackQuery::new("Song", "Other"));
        resolver.resolve(&TrackQuery::new("Song", ""));

        assert_eq!(search.calls.get(), 3);
        assert_eq!(resolver.cache().len(), 3);
        assert_eq!(search.queries.borrow()[2], "Song ");
    }
}
