//!
//! src/config.rs  Andrew Belles  Oct 19th, 2026
//!
//! Reads the environment (and an optional .env) into the configuration
//! the window locator, artwork resolver and logger expect
//!

use reqwest::header;
use url::Url;
use std::time;
use tracing::warn;
use crate::errors::NowPlayingError;

/// Constants for HTTP Config
pub const HTTP_TIMEOUT: u64 = 2000;
pub const HTTP_POOL_MAX_IDLE: usize = 1;
pub const HTTP_POOL_IDLE_TIMEOUT: u64 = 5000;
pub const HTTP_MAX_REDIRECTS: u8 = 4;

/// Constants for the Deezer search endpoint
pub const DEEZER_SEARCH_URL: &str = "https://api.deezer.com/search";
pub const DEEZER_HOST: &str = "api.deezer.com";
pub const DEEZER_USER_AGENT: &str = "DeezerOverlay/1.0";
pub const DEEZER_RESULT_LIMIT: u32 = 1;

/// Target window owner and the OS layer needed to list windows
pub const TARGET_APP: &str = "Deezer";
pub const WINDOW_CAPABILITY: &str = "Quartz";

/// Returns an override only if the variable is set to something non-blank
fn env_override(s: &str) -> Option<String> {
    match std::env::var(s) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Ensures that url is https
fn ensure_https(url: &Url) -> Result<(), String> {
    if url.scheme() == "https" {
        Ok(())
    } else {
        Err(format!("URL must be https: {url}"))
    }
}

fn ensure_host(url: &Url, expected_host: &str) -> Result<(), String> {
    match url.host_str() {
        Some(h) if h.eq_ignore_ascii_case(expected_host) => Ok(()),
        Some(h) => Err(
            format!("Unexpected host for {url} (got {h}, expected {expected_host})")
        ),
        None => Err(format!("URL missing host: {url}"))
    }
}

// unparsable values quietly keep the default
fn parse_millis(raw: Option<String>, default: u64) -> time::Duration {
    let ms = raw
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(default);
    time::Duration::from_millis(ms)
}

///
/// Which application's window we look for
///
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub app_name: String,
    pub capability: String
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            app_name: TARGET_APP.to_string(),
            capability: WINDOW_CAPABILITY.to_string()
        }
    }
}

fn build_target() -> TargetConfig {
    let mut target = TargetConfig::default();
    if let Some(app_name) = env_override("NOW_PLAYING_APP") {
        target.app_name = app_name;
    }
    target
}

///
/// Configuration for the public Deezer track search
///
#[derive(Debug, Clone)]
pub struct DeezerConfig {
    pub search_url: Url,      // https://api.deezer.com/search
    pub user_agent: String,   // sent on every request
    pub result_limit: u32     // always 1, we only read the first hit
}

impl Default for DeezerConfig {
    fn default() -> Self {
        Self {
            search_url: Url::parse(DEEZER_SEARCH_URL)
                .expect("constant search url parses"),
            user_agent: DEEZER_USER_AGENT.to_string(),
            result_limit: DEEZER_RESULT_LIMIT
        }
    }
}

fn check_search_url(raw: &str) -> Result<Url, NowPlayingError> {
    let url = Url::parse(raw)
        .map_err(|e| NowPlayingError::Config(
            format!("DEEZER_SEARCH_URL invalid {e}")
        ))?;

    ensure_https(&url).map_err(NowPlayingError::Config)?;
    ensure_host(&url, DEEZER_HOST).map_err(NowPlayingError::Config)?;
    Ok(url)
}

fn check_user_agent(raw: &str) -> Result<String, NowPlayingError> {
    header::HeaderValue::from_str(raw)
        .map(|_| raw.to_string())
        .map_err(|e| NowPlayingError::Config(
            format!("DEEZER_USER_AGENT invalid {e}")
        ))
}

// only the artwork lookup reads these, so a bad value is never fatal
fn build_deezer_from(search_url: Option<String>, user_agent: Option<String>) -> DeezerConfig {
    let mut deezer = DeezerConfig::default();

    if let Some(raw) = search_url {
        match check_search_url(&raw) {
            Ok(url) => deezer.search_url = url,
            Err(e) => warn!(error = %e, "config.search_url_ignored"),
        }
    }
    if let Some(raw) = user_agent {
        match check_user_agent(&raw) {
            Ok(agent) => deezer.user_agent = agent,
            Err(e) => warn!(error = %e, "config.user_agent_ignored"),
        }
    }

    deezer
}

fn build_deezer() -> DeezerConfig {
    build_deezer_from(
        env_override("DEEZER_SEARCH_URL"),
        env_override("DEEZER_USER_AGENT")
    )
}

///
/// Configuration for Http timeouts etc. No retries, a failed lookup is final
///
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: time::Duration,
    pub connect_timeout: time::Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: time::Duration,
    pub max_redirects: u8,
    pub use_system_proxy: bool
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: time::Duration::from_millis(HTTP_TIMEOUT),
            connect_timeout: time::Duration::from_millis(HTTP_TIMEOUT),
            pool_max_idle_per_host: HTTP_POOL_MAX_IDLE,
            pool_idle_timeout: time::Duration::from_millis(HTTP_POOL_IDLE_TIMEOUT),
            max_redirects: HTTP_MAX_REDIRECTS,
            use_system_proxy: true
        }
    }
}

fn build_http() -> HttpConfig {
    let timeout = parse_millis(env_override("HTTP_TIMEOUT_MS"), HTTP_TIMEOUT);
    HttpConfig {
        timeout,
        connect_timeout: timeout,
        ..HttpConfig::default()
    }
}

///
/// Configuration for Logger
///
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter_directives: String,
    pub include_file_line: bool,
    pub include_target: bool,
    pub include_spans: bool     // resolver lookups run inside a span
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter_directives: "warn,now_playing=warn,reqwest=warn".to_string(),
            include_file_line: false,
            include_target: true,
            include_spans: true
        }
    }
}

///
/// AppConfig which holds everything main hands to the locator and resolver
///
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub target: TargetConfig,
    pub deezer: DeezerConfig,
    pub http: HttpConfig
}

/// Pulls a .env into the process environment, if there is one
pub fn load_env() {
    dotenvy::dotenv().ok();
}

///
/// Return all environment-derived settings to caller at program start.
/// Overrides that fail validation are logged and replaced by defaults.
///
pub fn load_config() -> AppConfig {
    let target = build_target();
    let deezer = build_deezer();
    let http   = build_http();

    AppConfig { target, deezer, http }
}
