//! Multiplexer abstraction layer.
//!
//! Commands talk to the multiplexer only through the `Multiplexer` trait, so
//! the routing and directory logic can be exercised without a live tmux.

pub mod tmux;

use anyhow::Result;
use std::path::Path;
use tracing::debug;

pub use tmux::TmuxBackend;

use crate::config::Config;
use crate::navigation::MultiplexerPaneSnapshot;

/// Operations edmux needs from a terminal multiplexer.
///
/// Actions return a `Result` that callers log and discard. Queries never fail:
/// an unavailable multiplexer or unparsable output reads as `false`.
pub trait Multiplexer {
    /// Returns the name of this backend (e.g., "tmux")
    fn name(&self) -> &'static str;

    // === Actions ===

    /// Open a new window (tab) whose first pane starts in `dir`.
    fn new_window(&self, dir: &Path) -> Result<()>;

    /// Split the current pane side by side, the new pane starting in `dir`.
    fn split_window(&self, dir: &Path) -> Result<()>;

    /// Move focus to the next pane of the current window.
    fn select_next_pane(&self) -> Result<()>;

    // === Queries ===

    /// Whether the current pane touches the right edge of the window.
    fn pane_at_right(&self) -> bool;

    /// Whether the current pane touches the left edge of the window.
    fn pane_at_left(&self) -> bool;

    /// Number of panes in the current window. Failure reads as 1.
    fn pane_count(&self) -> u32;

    /// Query all pane facts the navigation router looks at, in order.
    fn pane_snapshot(&self) -> MultiplexerPaneSnapshot {
        MultiplexerPaneSnapshot {
            is_rightmost: self.pane_at_right(),
            is_leftmost: self.pane_at_left(),
            pane_count: self.pane_count(),
        }
    }
}

/// Create the backend described by the configuration.
pub fn create_backend(config: &Config) -> Box<dyn Multiplexer> {
    let backend = TmuxBackend::from_config(config);
    debug!(binary = backend.binary(), "mux:backend ready");
    Box::new(backend)
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording multiplexer used by command tests.

    use super::Multiplexer;
    use anyhow::{Result, anyhow};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        NewWindow(PathBuf),
        SplitWindow(PathBuf),
        SelectNextPane,
        PaneAtRight,
        PaneAtLeft,
        PaneCount,
    }

    #[derive(Default)]
    pub struct FakeMultiplexer {
        pub at_right: bool,
        pub at_left: bool,
        pub panes: u32,
        /// Make every action fail, as a missing tmux would
        pub fail_actions: bool,
        pub calls: RefCell<Vec<Call>>,
    }

    impl FakeMultiplexer {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) -> Result<()> {
            self.calls.borrow_mut().push(call);
            if self.fail_actions {
                return Err(anyhow!("fake multiplexer unavailable"));
            }
            Ok(())
        }
    }

    impl Multiplexer for FakeMultiplexer {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn new_window(&self, dir: &Path) -> Result<()> {
            self.record(Call::NewWindow(dir.to_path_buf()))
        }

        fn split_window(&self, dir: &Path) -> Result<()> {
            self.record(Call::SplitWindow(dir.to_path_buf()))
        }

        fn select_next_pane(&self) -> Result<()> {
            self.record(Call::SelectNextPane)
        }

        fn pane_at_right(&self) -> bool {
            self.calls.borrow_mut().push(Call::PaneAtRight);
            self.at_right
        }

        fn pane_at_left(&self) -> bool {
            self.calls.borrow_mut().push(Call::PaneAtLeft);
            self.at_left
        }

        fn pane_count(&self) -> u32 {
            self.calls.borrow_mut().push(Call::PaneCount);
            self.panes.max(1)
        }
    }
}
