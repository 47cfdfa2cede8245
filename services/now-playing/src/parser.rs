//!
//! src/parser.rs  Andrew Belles  Oct 19th, 2026
//!
//! Pulls a (song, artist) pair out of the player's window title. Rules are
//! checked in order and the first match wins:
//!
//!   "Song - Artist - Deezer"   song left, artist right
//!   "Artist - Song | Deezer"   artist left, song right (reversed)
//!   anything else non-empty    player open, nothing displayed
//!   empty / missing            player found, title not exposed
//!

use crate::types::TrackQuery;

pub const DASH_SUFFIX: &str = " - Deezer";
pub const PIPE_SUFFIX: &str = " | Deezer";
pub const SEPARATOR: &str = " - ";
pub const UNKNOWN_ARTIST: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTitle {
    /// `track` is what gets reported, `lookup` is what (if anything) is sent
    /// to the artwork search
    Track { track: TrackQuery, lookup: Option<TrackQuery> },
    Unrecognised(String),
    Untitled
}

fn split_pair(s: &str) -> Option<(&str, &str)> {
    s.split_once(SEPARATOR).map(|(l, r)| (l.trim(), r.trim()))
}

fn or_unknown(artist: &str) -> &str {
    if artist.is_empty() { UNKNOWN_ARTIST } else { artist }
}

/// Everything before the last " - Deezer"
fn parse_dash(title: &str) -> ParsedTitle {
    let body = title
        .rsplit_once(DASH_SUFFIX)
        .map_or(title, |(head, _)| head)
        .trim();

    match split_pair(body) {
        Some((song, artist)) => {
            let track = TrackQuery::new(song, or_unknown(artist));
            ParsedTitle::Track { lookup: Some(track.clone()), track }
        }
        // search with a blank artist, report it as Unknown
        None => ParsedTitle::Track {
            track: TrackQuery::new(body, UNKNOWN_ARTIST),
            lookup: Some(TrackQuery::new(body, ""))
        }
    }
}

/// Every " | Deezer" removed, then artist first
fn parse_pipe(title: &str) -> ParsedTitle {
    let stripped = title.replace(PIPE_SUFFIX, "");
    let body = stripped.trim();

    match split_pair(body) {
        Some((artist, song)) => {
            let track = TrackQuery::new(song, artist);
            ParsedTitle::Track { lookup: Some(track.clone()), track }
        }
        None => ParsedTitle::Track {
            track: TrackQuery::new(body, UNKNOWN_ARTIST),
            lookup: None
        }
    }
}

pub fn parse_title(title: Option<&str>) -> ParsedTitle {
    match title {
        None | Some("") => ParsedTitle::Untitled,
        Some(t) if t.contains(DASH_SUFFIX) => parse_dash(t),
        Some(t) if t.contains(PIPE_SUFFIX) => parse_pipe(t),
        Some(t) => ParsedTitle::Unrecognised(t.to_string())
    }
}
