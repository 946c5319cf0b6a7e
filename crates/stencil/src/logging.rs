//! Tracing setup for the CLI.
//!
//! Events go to stderr, filtered by `RUST_LOG` or, when that is unset, by the
//! `-q`/`-v` flags. When a log directory is configured a second layer writes
//! everything at debug and above to a daily rolling file there.

use camino::Utf8Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

/// Level directive for the stderr layer.
#[must_use]
pub fn default_directive(quiet: bool, verbose: u8, debug: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match (verbose, debug) {
        (0, false) => "warn",
        (0, true) | (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's `WorkerGuard` when file logging is enabled; it
/// must be held until the process exits or buffered lines are lost.
#[must_use]
pub fn init_tracing(directive: &str, log_dir: Option<&Utf8Path>) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "stencil.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // A subscriber may already be installed when embedded in tests.
    let _ = Registry::default()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}
