//! Logging Infrastructure
//!
//! `RUST_LOG` drives the filter. With `LOG_DIR` set, output goes to a
//! daily-rolling file instead of stdout; `LOG_FORMAT=json` emits JSON lines.

use std::path::Path;

use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const DEFAULT_FILTER: &str = "concierge_server=info,tower_http=info";

/// Initialize the global subscriber
pub fn init_logger(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let json = config.log_format.as_deref() == Some("json");
    let file = config.log_dir.as_deref().and_then(file_appender);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    match (json, file) {
        (true, Some(writer)) => builder.json().with_writer(writer).init(),
        (true, None) => builder.json().init(),
        (false, Some(writer)) => builder.with_ansi(false).with_writer(writer).init(),
        (false, None) => builder.init(),
    }
}

fn file_appender(dir: &str) -> Option<RollingFileAppender> {
    let log_path = Path::new(dir);
    if !log_path.exists() {
        std::fs::create_dir_all(log_path).ok()?;
    }
    Some(tracing_appender::rolling::daily(log_path, "concierge-server"))
}
