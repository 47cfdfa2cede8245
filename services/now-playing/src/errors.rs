//!
//! src/errors.rs  Andrew Belles  Oct 19th, 2026
//!
//! Defines enums and methods of error conversion
//! for errors the now-playing query uses
//!
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NowPlayingError {
    #[error("config error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0} not installed")]
    Capability(String)
}

impl NowPlayingError {
    /// Only the missing capability reaches main, and it ends the process with status 1
    pub fn exit_code(&self) -> u8 { 1 }
}

impl From<reqwest::Error> for NowPlayingError {
    fn from(e: reqwest::Error) -> Self { NowPlayingError::Http(e.to_string()) }
}

impl From<serde_json::Error> for NowPlayingError {
    fn from(e: serde_json::Error) -> Self { NowPlayingError::Parse(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_message_names_the_missing_layer() {
        let e = NowPlayingError::Capability("Quartz".to_string());
        assert_eq!(e.to_string(), "Quartz not installed");
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn serde_errors_convert_to_parse() {
        let raw = serde_json::from_str::<serde_json::Value>("{not json");
        let e: NowPlayingError = raw.unwrap_err().into();
        assert!(matches!(e, NowPlayingError::Parse(_)));
    }
}
