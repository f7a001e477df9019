use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::args::ContextArgs;
use super::best_effort;
use crate::config::Config;
use crate::multiplexer::{Multiplexer, create_backend};

pub fn run(config: &Config, context: &ContextArgs) -> Result<()> {
    let mux = create_backend(config);
    open_tab(mux.as_ref(), config, context);
    Ok(())
}

/// Open a multiplexer window in the resolved directory, returning that directory.
pub(crate) fn open_tab(mux: &dyn Multiplexer, config: &Config, context: &ContextArgs) -> PathBuf {
    let dir = context.pane_directory(config);
    info!(backend = mux.name(), dir = %dir.display(), "new-tab");
    best_effort(mux.new_window(&dir), "new-window");
    dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{BufferKind, PaneDirectoryPolicy};
    use crate::multiplexer::fake::{Call, FakeMultiplexer};

    #[test]
    fn opens_window_in_buffer_directory() {
        let mux = FakeMultiplexer::default();
        let context = ContextArgs {
            buffer_kind: BufferKind::FileVisiting,
            buffer_path: Some(PathBuf::from("/a/b/file.txt")),
            policy: Some(PaneDirectoryPolicy::BufferPath),
            ..ContextArgs::default()
        };
        let dir = open_tab(&mux, &Config::default(), &context);
        assert_eq!(dir, PathBuf::from("/a/b"));
        assert_eq!(mux.calls(), vec![Call::NewWindow(PathBuf::from("/a/b"))]);
    }

    #[test]
    fn multiplexer_failure_is_swallowed() {
        let mux = FakeMultiplexer {
            fail_actions: true,
            ..FakeMultiplexer::default()
        };
        let context = ContextArgs {
            policy: Some(PaneDirectoryPolicy::Home),
            fallback: Some(PathBuf::from("/fallback")),
            ..ContextArgs::default()
        };
        let dir = open_tab(&mux, &Config::default(), &context);
        assert_eq!(dir, PathBuf::from("/fallback"));
        assert_eq!(mux.calls().len(), 1);
    }
}
