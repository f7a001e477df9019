//! tmux backend implementation for the Multiplexer trait.
//!
//! The argument shapes here must stay exactly as tmux parses them.

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing::debug;

use crate::cmd::Cmd;
use crate::config::Config;

use super::Multiplexer;

/// Target for `select-pane`: the next pane of the current window.
const NEXT_PANE_TARGET: &str = ":.+";

/// tmux backend implementation.
#[derive(Debug)]
pub struct TmuxBackend {
    binary: String,
}

impl TmuxBackend {
    /// Create a backend that invokes `binary` for every tmux call.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Create a backend for the configured tmux command.
    ///
    /// Plain names are resolved on PATH up front. An unresolvable name is kept
    /// as-is so each call fails (and is ignored) individually.
    pub fn from_config(config: &Config) -> Self {
        let command = config.tmux_command();
        let binary = match which::which(command) {
            Ok(found) => found.to_string_lossy().into_owned(),
            Err(err) => {
                debug!(command, error = %err, "tmux:binary not found on PATH");
                command.to_string()
            }
        };
        Self::new(binary)
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run `display-message -p <format>`, returning the trimmed output.
    fn display(&self, format: &str) -> Option<String> {
        match Cmd::new(&self.binary)
            .args(&["display-message", "-p", format])
            .run_and_capture_stdout()
        {
            Ok(output) => Some(output),
            Err(err) => {
                debug!(format, error = %err, "tmux:query failed");
                None
            }
        }
    }

    /// Compare a boolean format's output to "1". Any failure reads as false.
    fn query_flag(&self, format: &str) -> bool {
        self.display(format).is_some_and(|out| is_true_flag(&out))
    }

    fn create_in_dir(&self, args: &[&str], dir: &Path, what: &str) -> Result<()> {
        let dir_str = dir
            .to_str()
            .ok_or_else(|| anyhow!("Working directory path contains non-UTF8 characters"))?;

        Cmd::new(&self.binary)
            .args(args)
            .args(&["-c", dir_str])
            .run()
            .with_context(|| format!("Failed to {what}"))?;
        Ok(())
    }
}

impl Multiplexer for TmuxBackend {
    fn name(&self) -> &'static str {
        "tmux"
    }

    fn new_window(&self, dir: &Path) -> Result<()> {
        self.create_in_dir(&["new-window"], dir, "create tmux window")
    }

    fn split_window(&self, dir: &Path) -> Result<()> {
        self.create_in_dir(&["split-window", "-h"], dir, "split tmux pane")
    }

    fn select_next_pane(&self) -> Result<()> {
        Cmd::new(&self.binary)
            .args(&["select-pane", "-t", NEXT_PANE_TARGET])
            .run()
            .context("Failed to select next pane")?;
        Ok(())
    }

    fn pane_at_right(&self) -> bool {
        self.query_flag("#{pane_at_right}")
    }

    fn pane_at_left(&self) -> bool {
        self.query_flag("#{pane_at_left}")
    }

    fn pane_count(&self) -> u32 {
        self.display("#{window_panes}")
            .map_or(1, |out| parse_pane_count(&out))
    }
}

/// tmux reports boolean formats as "1" / "0".
fn is_true_flag(output: &str) -> bool {
    output.trim() == "1"
}

/// "1" means a single pane; anything unparsable is treated the same way.
fn parse_pane_count(output: &str) -> u32 {
    output.trim().parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn flag_parsing() {
        assert!(is_true_flag("1"));
        assert!(is_true_flag(" 1\n"));
        assert!(!is_true_flag("0"));
        assert!(!is_true_flag(""));
        assert!(!is_true_flag("11"));
        assert!(!is_true_flag("yes"));
    }

    #[test]
    fn pane_count_parsing() {
        assert_eq!(parse_pane_count("1"), 1);
        assert_eq!(parse_pane_count("3\n"), 3);
        assert_eq!(parse_pane_count("0"), 1);
        assert_eq!(parse_pane_count(""), 1);
        assert_eq!(parse_pane_count("many"), 1);
    }

    #[test]
    fn missing_binary_reads_as_false() {
        let backend = TmuxBackend::new("edmux-no-such-tmux");
        assert!(!backend.pane_at_right());
        assert!(!backend.pane_at_left());
        assert_eq!(backend.pane_count(), 1);
        let snapshot = backend.pane_snapshot();
        assert!(!snapshot.offers_more_panes());
    }

    #[test]
    fn failing_binary_reads_as_false() {
        // `false` exits non-zero, `true` exits zero with unparsable (empty) output
        for binary in ["false", "true"] {
            let backend = TmuxBackend::new(binary);
            assert!(!backend.pane_at_right(), "{binary}");
            assert!(!backend.pane_at_left(), "{binary}");
            assert_eq!(backend.pane_count(), 1, "{binary}");
        }
    }

    #[test]
    fn actions_report_failure_without_panicking() {
        let backend = TmuxBackend::new("edmux-no-such-tmux");
        assert!(backend.new_window(&PathBuf::from("/tmp")).is_err());
        assert!(backend.split_window(&PathBuf::from("/tmp")).is_err());
        assert!(backend.select_next_pane().is_err());
    }

    #[test]
    fn actions_succeed_when_binary_succeeds() {
        let backend = TmuxBackend::new("true");
        assert!(backend.new_window(&PathBuf::from("/tmp")).is_ok());
        assert!(backend.split_window(&PathBuf::from("/tmp")).is_ok());
        assert!(backend.select_next_pane().is_ok());
    }

    #[test]
    fn from_config_keeps_unresolvable_command() {
        let config = Config {
            tmux_command: Some("edmux-no-such-tmux".to_string()),
            ..Config::default()
        };
        assert_eq!(TmuxBackend::from_config(&config).binary(), "edmux-no-such-tmux");
    }
}
