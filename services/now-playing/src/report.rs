//!
//! src/report.rs  Andrew Belles  Oct 19th, 2026
//!
//! Turns the located window (or its absence) into the one result record,
//! asking the resolver for artwork only when a track was parsed
//!

use tracing::info;

use crate::artwork::{ArtworkResolver, TrackSearch};
use crate::parser::{parse_title, ParsedTitle};
use crate::types::{ResultRecord, WindowRecord};

pub fn build_result<S: TrackSearch>(
    window: Option<&WindowRecord>,
    app_name: &str,
    artwork: &mut ArtworkResolver<S>
) -> ResultRecord {
    let Some(window) = window else {
        info!(app = app_name, "report.not_found");
        return ResultRecord::not_found(app_name);
    };

    match parse_title(window.title.as_deref()) {
        ParsedTitle::Track { track, lookup } => {
            let cover = lookup.and_then(|query| artwork.resolve(&query));
            info!(song = %track.song, artist = %track.artist, artwork = cover.is_some(),
                "report.playing");
            ResultRecord::playing(track, cover)
        }
        ParsedTitle::Unrecognised(raw) => ResultRecord::unrecognised(&raw),
        ParsedTitle::Untitled => ResultRecord::untitled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NowPlayingError;
    use std::cell::Cell;

    struct FixedSearch {
        calls: Cell<usize>,
        online: bool
    }

    impl TrackSearch for &FixedSearch {
        fn first_cover(&self, _query: &str) -> Result<Option<String>, NowPlayingError> {
            self.calls.set(self.calls.get() + 1);
            if self.online {
                Ok(Some("https://cdn/250.jpg".to_string()))
            } else {
                Err(NowPlayingError::Http("operation timed out".to_string()))
            }
        }
    }

    fn search(online: bool) -> FixedSearch {
        FixedSearch { calls: Cell::new(0), online }
    }

    fn window(title: Option<&str>) -> WindowRecord {
        WindowRecord::new("Deezer", title)
    }

    #[test]
    fn dash_title_reports_track_and_cover() {
        let s = search(true);
        let mut resolver = ArtworkResolver::new(&s);

        let r = build_result(Some(&window(Some("Song - Artist - Deezer"))), "Deezer", &mut resolver);
        assert!(r.playing);
        assert_eq!(r.title.as_deref(), Some("Song"));
        assert_eq!(r.artist.as_deref(), Some("Artist"));
        assert_eq!(r.artwork.as_deref(), Some("https://cdn/250.jpg"));
        assert_eq!(r.error, None);
    }

    #[test]
    fn lookup_failure_only_blanks_the_artwork() {
        let s = search(false);
        let mut resolver = ArtworkResolver::new(&s);

        let r = build_result(Some(&window(Some("Artist - Song | Deezer"))), "Deezer", &mut resolver);
        assert_eq!(r, ResultRecord::playing(
            crate::types::TrackQuery::new("Song", "Artist"), None
        ));
        assert_eq!(s.calls.get(), 1);
    }

    #[test]
    fn pipe_title_without_separator_never_searches() {
        let s = search(true);
        let mut resolver = ArtworkResolver::new(&s);

        let r = build_result(Some(&window(Some("Flow | Deezer"))), "Deezer", &mut resolver);
        assert!(r.playing);
        assert_eq!(r.title.as_deref(), Some("Flow"));
        assert_eq!(r.artist.as_deref(), Some("Unknown"));
        assert_eq!(r.artwork, None);
        assert_eq!(s.calls.get(), 0);
    }

    #[test]
    fn repeated_reports_reuse_the_cache() {
        let s = search(true);
        let mut resolver = ArtworkResolver::new(&s);
        let w = window(Some("Song - Artist - Deezer"));

        let first = build_result(Some(&w), "Deezer", &mut resolver);
        let second = build_result(Some(&w), "Deezer", &mut resolver);
        assert_eq!(first, second);
        assert_eq!(s.calls.get(), 1);
    }

    #[test]
    fn unrecognised_title_is_carried_raw() {
        let s = search(true);
        let mut resolver = ArtworkResolver::new(&s);

        let r = build_result(Some(&window(Some("Deezer"))), "Deezer", &mut resolver);
        assert!(!r.playing);
        assert_eq!(r.title, None);
        assert_eq!(r.artist, None);
        assert_eq!(r.window_title.as_deref(), Some("Deezer"));
        assert_eq!(s.calls.get(), 0);
    }

    #[test]
    fn empty_title_sets_found_flag_only() {
        let s = search(true);
        let mut resolver = ArtworkResolver::new(&s);

        for title in [None, Some("")] {
            let r = build_result(Some(&window(title)), "Deezer", &mut resolver);
            assert!(!r.playing);
            assert_eq!(r.deezer_found, Some(true));
            assert_eq!(r.window_title, None);
            assert_eq!(r.title, None);
        }
    }

    #[test]
    fn absent_window_is_an_error_record() {
        let s = search(true);
        let mut resolver = ArtworkResolver::new(&s);

        let r = build_result(None, "Deezer", &mut resolver);
        assert!(!r.playing);
        assert_eq!(r.title, None);
        assert_eq!(r.artist, None);
        assert_eq!(r.error.as_deref(), Some("Deezer not found"));
    }
}
