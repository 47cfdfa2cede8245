//!
//! src/main.rs  Andrew Belles  Oct 19th, 2026
//!
//! One-shot query: find the Deezer window, read the track out of its
//! title, attach album art, print a single JSON line and exit
//!
//!

mod config;
mod errors;
mod logging;

mod artwork;
mod fetch;
mod parser;
mod report;
mod types;
mod windows;

use std::io::Write;
use std::process::ExitCode;

use crate::artwork::{ArtworkResolver, TrackSearch};
use crate::config::AppConfig;
use crate::errors::NowPlayingError;
use crate::types::ResultRecord;
use crate::windows::WindowSource;

/// Locate the window and describe it. Only the window listing can fail here
fn now_playing<S: TrackSearch>(
    source: &dyn WindowSource,
    app_name: &str,
    artwork: &mut ArtworkResolver<S>
) -> Result<ResultRecord, NowPlayingError> {
    let listing = source.on_screen_windows()?;
    let window = windows::locate(&listing, app_name);
    Ok(report::build_result(window, app_name, artwork))
}

/// The capability check is the only step allowed to end the run early
fn run_with(
    cfgs: &AppConfig,
    source: Result<Box<dyn WindowSource>, NowPlayingError>
) -> Result<String, NowPlayingError> {
    let source = source?;

    // without a client the record still goes out, just with no artwork
    let deezer = match fetch::DeezerClient::new(&cfgs.http, &cfgs.deezer) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(error = %e, "now_playing.no_search_client");
            None
        }
    };
    let mut artwork = ArtworkResolver::new(deezer);

    let record = now_playing(source.as_ref(), &cfgs.target.app_name, &mut artwork)?;
    Ok(serde_json::to_string(&record)?)
}

fn run(cfgs: &AppConfig) -> Result<String, NowPlayingError> {
    run_with(cfgs, windows::system_source(&cfgs.target.capability))
}

/// The stdout line and exit status for a finished run
fn render(result: Result<String, NowPlayingError>) -> (String, u8) {
    match result {
        Ok(line) => (line, 0),
        Err(e) => {
            tracing::debug!(error = %e, "now_playing.fatal");
            let line = serde_json::json!({ "error": e.to_string() }).to_string();
            (line, e.exit_code())
        }
    }
}

fn emit(result: Result<String, NowPlayingError>) -> ExitCode {
    let (line, code) = render(result);

    // a closed pipe on the reader's side is not our failure
    let mut out = std::io::stdout().lock();
    let _ = writeln!(out, "{line}").and_then(|_| out.flush());
    ExitCode::from(code)
}

fn main() -> ExitCode {
    config::load_env();
    let _logger = logging::init_logging(&config::LoggingConfig::default());
    let cfgs = config::load_config();

    tracing::info!(
        service="now-playing",
        version=%env!("CARGO_PKG_VERSION"),
        app=%cfgs.target.app_name,
        "starting"
    );

    emit(run(&cfgs))
}
