use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::AppPaths;

const LOG_FILE: &str = "server.log";

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "info,portfolio_assistant=info,tower_http=info";

// the file writer stops flushing once its guard drops
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Logs to stdout and to a daily-rolled `server.log` under the log dir.
pub fn init(paths: &AppPaths) {
    let file_layer = file_writer(&paths.log_dir).map(|writer| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing already initialized; keeping existing subscriber");
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn file_writer(log_dir: &Path) -> Option<tracing_appender::non_blocking::NonBlocking> {
    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "Log directory {} unavailable ({}); logging to stdout only",
            log_dir.display(),
            err
        );
        return None;
    }

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, LOG_FILE));
    // a second init keeps the first guard; its writer is dropped with the rejected subscriber
    let _ = FILE_GUARD.set(guard);
    Some(writer)
}
