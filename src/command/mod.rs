pub mod args;
pub mod keys;
pub mod new_tab;
pub mod next_window;
pub mod resolve_dir;
pub mod show_config;
pub mod split;

use tracing::debug;

/// Discard the outcome of a best-effort multiplexer action.
///
/// The editor-side behaviour never depends on tmux, so failures stop here.
fn best_effort(result: anyhow::Result<()>, what: &str) {
    match result {
        Ok(()) => debug!(what, "mux:action done"),
        Err(err) => debug!(what, error = ?err, "mux:action failed (ignored)"),
    }
}
