//!
//! src/logging.rs  Andrew Belles  Oct 19th, 2026
//!
//! JSON event logger on stderr. Stdout belongs to the result line, so
//! nothing in here may write there. Logging is optional: if the
//! subscriber can't be installed the query runs silently.
//!

use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_error::ErrorLayer;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::LoggingConfig;

/// Flushes buffered events when dropped, hold it until main returns
pub struct LoggingGuard {
    _guard: WorkerGuard
}

/// RUST_LOG wins when it parses, a typo there shouldn't cost us the defaults
fn user_directives(raw: Option<String>) -> Option<EnvFilter> {
    raw.filter(|r| !r.trim().is_empty())
        .and_then(|r| EnvFilter::try_new(r).ok())
}

fn build_filter(cfg: &LoggingConfig) -> EnvFilter {
    user_directives(std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| EnvFilter::new(&cfg.filter_directives))
}

pub fn init_logging(cfg: &LoggingConfig) -> Option<LoggingGuard> {
    let (writer, guard) = non_blocking(std::io::stderr());

    let events = fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_target(cfg.include_target)
        .with_file(cfg.include_file_line)
        .with_line_number(cfg.include_file_line)
        .json()
        .flatten_event(true)
        .with_current_span(cfg.include_spans)
        .with_span_list(cfg.include_spans);

    tracing_subscriber::registry()
        .with(build_filter(cfg))
        .with(events)
        .with(ErrorLayer::default())
        .try_init()
        .ok()?;

    Some( LoggingGuard { _guard: guard } )
}
