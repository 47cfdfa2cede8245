use serde::Serialize;

// One on-screen window as the OS reported it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub owner: String,
    pub title: Option<String>
}

#[cfg(test)]
impl WindowRecord {
    pub fn new(owner: impl Into<String>, title: Option<&str>) -> Self {
        Self { owner: owner.into(), title: title.map(str::to_string) }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackQuery {
    pub song: String,
    pub artist: String
}

impl TrackQuery {
    pub fn new(song: impl Into<String>, artist: impl Into<String>) -> Self {
        Self { song: song.into(), artist: artist.into() }
    }

    /// "song|artist", the artwork cache key
    pub fn cache_key(&self) -> String {
        format!("{}|{}", self.song, self.artist)
    }

    /// "song artist", the free text sent to the search endpoint
    pub fn search_text(&self) -> String {
        format!("{} {}", self.song, self.artist)
    }
}


// The one JSON object printed per run. title/artist/artwork are always
// present (null when unknown), the diagnostics only when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub playing: bool,
    pub artwork: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deezer_found: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>
}

impl ResultRecord {
    fn idle() -> Self {
        Self {
            title: None,
            artist: None,
            playing: false,
            artwork: None,
            window_title: None,
            deezer_found: None,
            error: None
        }
    }

    pub fn playing(track: TrackQuery, artwork: Option<String>) -> Self {
        Self {
            title: Some(track.song),
            artist: Some(track.artist),
            playing: true,
            artwork,
            ..Self::idle()
        }
    }

    /// Window is up but its title carries no track
    pub fn unrecognised(raw_title: &str) -> Self {
        Self { window_title: Some(raw_title.to_string()), ..Self::idle() }
    }

    /// Window is up but the OS gave us no title for it
    pub fn untitled() -> Self {
        Self { deezer_found: Some(true), ..Self::idle() }
    }

    pub fn not_found(app_name: &str) -> Self {
        Self { error: Some(format!("{app_name} not found")), ..Self::idle() }
    }
}
