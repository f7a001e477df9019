use anyhow::Result;
use tracing::info;

use super::args::LayoutArgs;
use super::best_effort;
use crate::config::Config;
use crate::multiplexer::{Multiplexer, create_backend};
use crate::navigation::{Action, MultiplexerPaneSnapshot, NavigationStyle, WindowLayoutSnapshot};

pub fn run(
    config: &Config,
    layout: &LayoutArgs,
    style: Option<NavigationStyle>,
    dry_run: bool,
) -> Result<()> {
    let mux = create_backend(config);
    let style = style.unwrap_or(config.navigation);
    let action = route(mux.as_ref(), style, layout.snapshot(), dry_run);
    // The editor reads this word to decide whether to cycle its own windows
    println!("{action}");
    Ok(())
}

/// Decide where "next window" goes and perform the multiplexer half of it.
pub(crate) fn route(
    mux: &dyn Multiplexer,
    style: NavigationStyle,
    layout: WindowLayoutSnapshot,
    dry_run: bool,
) -> Action {
    // Outside the boundary case the router ignores tmux, so skip the queries
    let pane = if style.needs_pane_snapshot(layout) {
        mux.pane_snapshot()
    } else {
        MultiplexerPaneSnapshot::default()
    };
    let action = style.route(layout, pane);
    info!(?style, ?layout, ?pane, ?action, dry_run, "next-window");

    if action.delegates() && !dry_run {
        best_effort(mux.select_next_pane(), "select-pane");
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiplexer::fake::{Call, FakeMultiplexer};

    fn layout(window_count: u32, right: bool, below: bool) -> WindowLayoutSnapshot {
        WindowLayoutSnapshot {
            window_count,
            has_window_right: right,
            has_window_below: below,
        }
    }

    #[test]
    fn single_window_delegates_without_querying() {
        let mux = FakeMultiplexer::default();
        let action = route(&mux, NavigationStyle::Boundary, layout(1, false, false), false);
        assert_eq!(action, Action::DelegateToMultiplexer);
        assert_eq!(mux.calls(), vec![Call::SelectNextPane]);
    }

    #[test]
    fn inner_window_stays_in_editor_without_querying() {
        let mux = FakeMultiplexer {
            panes: 3,
            ..FakeMultiplexer::default()
        };
        let action = route(&mux, NavigationStyle::Boundary, layout(3, false, true), false);
        assert_eq!(action, Action::MoveWithinEditor);
        assert!(mux.calls().is_empty());
    }

    #[test]
    fn boundary_with_more_panes_moves_and_delegates() {
        let mux = FakeMultiplexer {
            panes: 2,
            ..FakeMultiplexer::default()
        };
        let action = route(&mux, NavigationStyle::Boundary, layout(2, false, false), false);
        assert_eq!(action, Action::MoveWithinEditorThenDelegate);
        assert_eq!(
            mux.calls(),
            vec![
                Call::PaneAtRight,
                Call::PaneAtLeft,
                Call::PaneCount,
                Call::SelectNextPane
            ]
        );
    }

    #[test]
    fn boundary_with_lone_inner_pane_stays_in_editor() {
        let mux = FakeMultiplexer::default();
        let action = route(&mux, NavigationStyle::Boundary, layout(2, false, false), false);
        assert_eq!(action, Action::MoveWithinEditor);
        assert!(!mux.calls().contains(&Call::SelectNextPane));
    }

    #[test]
    fn dry_run_skips_delegation() {
        let mux = FakeMultiplexer::default();
        let action = route(&mux, NavigationStyle::Simple, layout(1, false, false), true);
        assert_eq!(action, Action::DelegateToMultiplexer);
        assert!(mux.calls().is_empty());
    }

    #[test]
    fn failing_multiplexer_never_escapes() {
        let mux = FakeMultiplexer {
            at_right: true,
            fail_actions: true,
            ..FakeMultiplexer::default()
        };
        let action = route(&mux, NavigationStyle::Boundary, layout(2, false, false), false);
        assert_eq!(action, Action::MoveWithinEditorThenDelegate);
    }

    #[test]
    fn simple_style_ignores_pane_position() {
        let mux = FakeMultiplexer {
            at_right: true,
            panes: 4,
            ..FakeMultiplexer::default()
        };
        let action = route(&mux, NavigationStyle::Simple, layout(2, false, false), false);
        assert_eq!(action, Action::MoveWithinEditor);
        assert!(mux.calls().is_empty());
    }

    #[test]
    fn unavailable_tmux_degrades_to_editor_move() {
        let mux = crate::multiplexer::TmuxBackend::new("edmux-no-such-tmux");
        let action = route(&mux, NavigationStyle::Boundary, layout(2, false, false), false);
        assert_eq!(action, Action::MoveWithinEditor);
    }
}
