use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::args::ContextArgs;
use super::best_effort;
use crate::config::Config;
use crate::multiplexer::{Multiplexer, create_backend};

pub fn run(config: &Config, context: &ContextArgs) -> Result<()> {
    let mux = create_backend(config);
    split_pane(mux.as_ref(), config, context);
    Ok(())
}

/// Split the current pane side by side, the new pane starting in the resolved directory.
pub(crate) fn split_pane(mux: &dyn Multiplexer, config: &Config, context: &ContextArgs) -> PathBuf {
    let dir = context.pane_directory(config);
    info!(backend = mux.name(), dir = %dir.display(), "split");
    best_effort(mux.split_window(&dir), "split-window");
    dir
}
