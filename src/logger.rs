//! File logging for edmux.
//!
//! edmux runs once per keystroke, so logging must never get in the way of the
//! command. If the log file cannot be opened, the process simply runs without
//! a subscriber.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE: &str = "edmux.log";

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Start logging to the edmux state file.
///
/// Returns the log path when logging is on. Any failure leaves logging off.
pub fn init() -> Option<PathBuf> {
    let path = log_path();
    match start(&path) {
        Ok(()) => {
            debug!(path = %path.display(), "logger:started");
            Some(path)
        }
        Err(_) => None,
    }
}

/// Open `path` and install the global subscriber writing to it.
fn start(path: &Path) -> Result<()> {
    let (writer, guard) = open_writer(path)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("tracing subscriber already installed")?;

    // Only keep the worker alive once the subscriber actually uses it
    let _ = GUARD.set(guard);
    Ok(())
}

/// Open the log file for appending, creating its directory, and wrap it in a
/// non-blocking writer.
fn open_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let file = open_append(path)?;
    Ok(tracing_appender::non_blocking(file))
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}

fn log_path() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME")
        && !state_home.is_empty()
    {
        return PathBuf::from(state_home).join("edmux").join(LOG_FILE);
    }

    if let Some(home_dir) = home::home_dir() {
        return home_dir.join(".local/state/edmux").join(LOG_FILE);
    }

    // Editors spawn us from arbitrary directories; never log into them
    std::env::temp_dir().join(LOG_FILE)
}
