//! Tracing subscriber setup.
//!
//! ## Log Levels
//! - `RUST_LOG` always wins when set
//! - `--debug` - debug for tally crates and request spans
//! - Default: INFO level

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default filter directives when `RUST_LOG` is unset.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,tally_api=debug,tally_store=debug,tower_http=debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber, writing to `log_file` when given.
///
/// A log file that cannot be opened is reported and stderr is used instead.
pub fn init_tracing(debug: bool, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let Some(path) = log_file else {
        builder.init();
        return;
    };

    match open_log_file(path) {
        Ok(file) => {
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
            info!(path = %path.display(), "Logging to file");
        }
        Err(e) => {
            builder.init();
            warn!(path = %path.display(), error = %e, "Failed to open log file, logging to stderr");
        }
    }
}

/// Opens `path` for appending, creating it and its directory if needed.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
