//! Routing of the "next window" keystroke between the editor and tmux.
//!
//! Editor windows and tmux panes are treated as one ring. When the editor is
//! on its last window, the keystroke also nudges tmux forward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The editor's window layout at the moment the keystroke fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayoutSnapshot {
    /// Visible editor windows, at least 1
    pub window_count: u32,
    pub has_window_right: bool,
    pub has_window_below: bool,
}

impl WindowLayoutSnapshot {
    /// True when the focused window is the last one in the editor's cycle.
    pub fn is_last_in_cycle(&self) -> bool {
        !self.has_window_right && !self.has_window_below
    }
}

/// Position of the current tmux pane, as reported by tmux.
///
/// Failed or unparsable queries are represented as `false` / a count of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplexerPaneSnapshot {
    pub pane_count: u32,
    pub is_rightmost: bool,
    pub is_leftmost: bool,
}

impl Default for MultiplexerPaneSnapshot {
    fn default() -> Self {
        Self {
            pane_count: 1,
            is_rightmost: false,
            is_leftmost: false,
        }
    }
}

impl MultiplexerPaneSnapshot {
    /// Whether tmux plausibly has another pane to move to.
    pub fn offers_more_panes(&self) -> bool {
        self.is_rightmost || self.is_leftmost || self.pane_count > 1
    }
}

/// What a "next window" keystroke should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Cycle to the editor's next window
    MoveWithinEditor,
    /// Forward to tmux's "select next pane"
    DelegateToMultiplexer,
    /// Cycle the editor back to its first window and also select the next tmux pane
    MoveWithinEditorThenDelegate,
}

impl Action {
    /// Whether tmux has to select its next pane.
    pub fn delegates(self) -> bool {
        matches!(
            self,
            Self::DelegateToMultiplexer | Self::MoveWithinEditorThenDelegate
        )
    }
}

impl fmt::Display for Action {
    /// The word printed for the editor to act on.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::MoveWithinEditor => "editor",
            Self::DelegateToMultiplexer => "multiplexer",
            Self::MoveWithinEditorThenDelegate => "editor+multiplexer",
        };
        f.write_str(word)
    }
}

/// Which routing variant to use.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NavigationStyle {
    /// Wrap into tmux when leaving the editor's last window
    #[default]
    Boundary,
    /// Only delegate when the editor has a single window
    Simple,
}

impl NavigationStyle {
    pub fn route(self, layout: WindowLayoutSnapshot, pane: MultiplexerPaneSnapshot) -> Action {
        match self {
            Self::Boundary => route_next_window(layout, pane),
            Self::Simple => route_next_window_simple(layout),
        }
    }

    /// Whether routing under this style can depend on the pane snapshot.
    pub fn needs_pane_snapshot(self, layout: WindowLayoutSnapshot) -> bool {
        match self {
            Self::Boundary => layout.window_count > 1 && layout.is_last_in_cycle(),
            Self::Simple => false,
        }
    }
}

/// Boundary-aware routing.
pub fn route_next_window(layout: WindowLayoutSnapshot, pane: MultiplexerPaneSnapshot) -> Action {
    if layout.window_count <= 1 {
        return Action::DelegateToMultiplexer;
    }
    if layout.is_last_in_cycle() && pane.offers_more_panes() {
        return Action::MoveWithinEditorThenDelegate;
    }
    Action::MoveWithinEditor
}

/// Routing that ignores tmux entirely unless the editor has one window.
pub fn route_next_window_simple(layout: WindowLayoutSnapshot) -> Action {
    if layout.window_count <= 1 {
        Action::DelegateToMultiplexer
    } else {
        Action::MoveWithinEditor
    }
}
