use std::path::PathBuf;

use crate::config::Config;
use crate::directory::{BufferKind, EditorContext, PaneDirectoryPolicy, resolve_pane_directory};
use crate::navigation::WindowLayoutSnapshot;

/// Description of the editor buffer that had focus when the key was pressed.
#[derive(clap::Args, Debug, Default)]
pub struct ContextArgs {
    /// What the current buffer shows
    #[arg(long, value_enum, default_value = "other")]
    pub buffer_kind: BufferKind,

    /// File visited by the buffer, or the directory it lists
    #[arg(long, value_hint = clap::ValueHint::AnyPath)]
    pub buffer_path: Option<PathBuf>,

    /// Project root as known to the editor (looked up with git when omitted)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub project_root: Option<PathBuf>,

    /// Override the configured directory policy
    #[arg(long, value_enum)]
    pub policy: Option<PaneDirectoryPolicy>,

    /// Override the configured fallback directory
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub fallback: Option<PathBuf>,
}

impl ContextArgs {
    /// Capture the editor context, filling in the working directory and,
    /// when the policy wants it, a git-detected project root.
    pub fn editor_context(&self, policy: PaneDirectoryPolicy) -> EditorContext {
        let ctx = EditorContext {
            buffer_kind: self.buffer_kind,
            buffer_path: self.buffer_path.clone(),
            project_root: self.project_root.clone(),
            working_dir: std::env::current_dir().ok(),
        };
        match policy {
            PaneDirectoryPolicy::ProjectRoot => ctx.with_detected_project_root(),
            PaneDirectoryPolicy::BufferPath | PaneDirectoryPolicy::Home => ctx,
        }
    }

    /// Resolve the directory a new pane should start in.
    pub fn pane_directory(&self, config: &Config) -> PathBuf {
        let policy = self.policy.unwrap_or(config.directory_policy);
        let fallback = self
            .fallback
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| config.fallback_directory());
        let ctx = self.editor_context(policy);
        resolve_pane_directory(policy, &ctx, &fallback)
    }
}

/// The editor's window layout, as reported by the editor.
#[derive(clap::Args, Debug)]
pub struct LayoutArgs {
    /// Number of visible editor windows
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub window_count: u32,

    /// The focused window has a neighbour to its right
    #[arg(long)]
    pub has_right: bool,

    /// The focused window has a neighbour below it
    #[arg(long)]
    pub has_below: bool,
}

impl LayoutArgs {
    pub fn snapshot(&self) -> WindowLayoutSnapshot {
        WindowLayoutSnapshot {
            window_count: self.window_count,
            has_window_right: self.has_right,
            has_window_below: self.has_below,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn explicit_fallback_overrides_config() {
        let args = ContextArgs {
            policy: Some(PaneDirectoryPolicy::Home),
            fallback: Some(PathBuf::from("/override")),
            ..ContextArgs::default()
        };
        assert_eq!(args.pane_directory(&Config::default()), Path::new("/override"));
    }

    #[test]
    fn policy_override_beats_config() {
        let config = Config {
            fallback_directory: Some("/fallback".to_string()),
            ..Config::default()
        };
        let args = ContextArgs {
            buffer_kind: BufferKind::DirectoryListing,
            buffer_path: Some(PathBuf::from("/x/y/")),
            policy: Some(PaneDirectoryPolicy::Home),
            ..ContextArgs::default()
        };
        assert_eq!(args.pane_directory(&config), Path::new("/fallback"));

        let args = ContextArgs {
            policy: Some(PaneDirectoryPolicy::BufferPath),
            ..args
        };
        assert_eq!(args.pane_directory(&config).as_os_str(), "/x/y/");
    }

    #[test]
    fn supplied_project_root_is_used() {
        let args = ContextArgs {
            buffer_kind: BufferKind::FileVisiting,
            buffer_path: Some(PathBuf::from("/a/b/file.txt")),
            project_root: Some(PathBuf::from("/a")),
            ..ContextArgs::default()
        };
        assert_eq!(args.pane_directory(&Config::default()), Path::new("/a"));
    }
}
