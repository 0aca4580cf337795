//! File-only tracing setup

use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming the log file. Unset means no logging at all.
pub const LOG_ENV: &str = "POKEDEX_LOG";

/// Initialize file-only tracing.
///
/// Anything written to stdout would tear the TUI, so output only goes to
/// the file named by `POKEDEX_LOG`. Verbosity comes from `RUST_LOG` and
/// defaults to `info`.
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV).ok().filter(|path| !path.is_empty()) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match std::fs::File::create(&log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to create log file {log_path}: {err}");
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
