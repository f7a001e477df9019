//! Choosing the directory a new tmux window or pane opens in.
//!
//! Resolution is an ordered fallback chain that always ends in the configured
//! fallback directory, so callers never receive an empty path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cmd::Cmd;

/// How the directory for a new pane is chosen.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PaneDirectoryPolicy {
    /// Project root, then the buffer's directory, then the fallback
    #[default]
    ProjectRoot,
    /// The buffer's directory, then the fallback
    BufferPath,
    /// Always the fallback
    Home,
}

/// What the editor's current buffer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BufferKind {
    /// A buffer visiting a file
    #[value(name = "file")]
    FileVisiting,
    /// A file-manager style listing of a directory
    #[value(name = "directory")]
    DirectoryListing,
    #[default]
    Other,
}

/// The editor state relevant to directory resolution, captured per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorContext {
    pub buffer_kind: BufferKind,
    /// File path for file buffers, listed directory for listings
    pub buffer_path: Option<PathBuf>,
    pub project_root: Option<PathBuf>,
    /// Current directory of the host process
    pub working_dir: Option<PathBuf>,
}

impl EditorContext {
    /// Directory derived from the current buffer alone.
    ///
    /// Listings yield their own directory verbatim; anything else with a path
    /// yields the containing directory; no path falls back to `working_dir`.
    pub fn buffer_directory(&self) -> Option<PathBuf> {
        let derived = match (self.buffer_kind, self.buffer_path.as_deref()) {
            (BufferKind::DirectoryListing, Some(dir)) => Some(dir.to_path_buf()),
            (BufferKind::FileVisiting | BufferKind::Other, Some(file)) => {
                file.parent().map(Path::to_path_buf)
            }
            (_, None) => self.working_dir.clone(),
        };
        derived.filter(|p| !is_empty(p))
    }

    /// Fill in `project_root` from git when the editor did not supply one.
    ///
    /// Lookup starts from the buffer directory. Failure leaves it unset.
    pub fn with_detected_project_root(mut self) -> Self {
        if self.project_root.is_none()
            && let Some(dir) = self.buffer_directory()
        {
            self.project_root = detect_project_root(&dir);
        }
        self
    }
}

/// Resolve the directory a new pane should open in.
///
/// Never fails. Every branch ends in a concrete path, with `fallback` as the
/// terminal case.
pub fn resolve_pane_directory(
    policy: PaneDirectoryPolicy,
    ctx: &EditorContext,
    fallback: &Path,
) -> PathBuf {
    let resolved = match policy {
        PaneDirectoryPolicy::ProjectRoot => ctx
            .project_root
            .clone()
            .filter(|p| !is_empty(p))
            .or_else(|| ctx.buffer_directory()),
        PaneDirectoryPolicy::BufferPath => ctx.buffer_directory(),
        PaneDirectoryPolicy::Home => None,
    };
    resolved.unwrap_or_else(|| fallback.to_path_buf())
}

/// Ask git for the top of the repository containing `dir`.
pub fn detect_project_root(dir: &Path) -> Option<PathBuf> {
    // Skip the spawn entirely for directories that no longer exist
    if !dir.is_dir() {
        return None;
    }
    Cmd::new("git")
        .args(&["rev-parse", "--show-toplevel"])
        .workdir(dir)
        .run_and_capture_stdout()
        .ok()
        .filter(|root| !root.is_empty())
        .map(PathBuf::from)
}

fn is_empty(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
