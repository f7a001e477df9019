use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::directory::PaneDirectoryPolicy;
use crate::navigation::NavigationStyle;

const DEFAULT_PREFIX_KEY: &str = "C-b";
const DEFAULT_NEW_TAB_KEY: &str = "c";
const DEFAULT_SPLIT_KEY: &str = "%";
const DEFAULT_NEXT_WINDOW_KEY: &str = "C-x o";
const DEFAULT_FALLBACK_DIRECTORY: &str = "~";
const DEFAULT_TMUX_COMMAND: &str = "tmux";

/// Rejected configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{0}' must not be empty")]
    EmptyValue(&'static str),
    #[error("'prefix_key' and 'next_window_key' must differ (both are '{0}')")]
    ConflictingKeys(String),
}

/// Configuration for edmux, read from config.yaml.
///
/// Loaded once at startup and treated as read-only afterwards.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Key that starts a multiplexer-style chord in the editor. Default: C-b
    #[serde(default)]
    pub prefix_key: Option<String>,

    /// Key pressed after the prefix to open a new tmux window. Default: c
    #[serde(default)]
    pub new_tab_key: Option<String>,

    /// Key pressed after the prefix to split the tmux pane. Default: %
    #[serde(default)]
    pub split_key: Option<String>,

    /// Full key sequence for "next window". Default: C-x o
    #[serde(default)]
    pub next_window_key: Option<String>,

    /// Directory used when nothing better can be derived. Default: ~
    #[serde(default)]
    pub fallback_directory: Option<String>,

    /// How the directory for new panes is chosen
    #[serde(default)]
    pub directory_policy: PaneDirectoryPolicy,

    /// Which "next window" routing variant to use
    #[serde(default)]
    pub navigation: NavigationStyle,

    /// tmux executable name or path. Default: tmux
    #[serde(default)]
    pub tmux_command: Option<String>,
}

impl Config {
    pub fn prefix_key(&self) -> &str {
        self.prefix_key.as_deref().unwrap_or(DEFAULT_PREFIX_KEY)
    }

    pub fn new_tab_key(&self) -> &str {
        self.new_tab_key.as_deref().unwrap_or(DEFAULT_NEW_TAB_KEY)
    }

    pub fn split_key(&self) -> &str {
        self.split_key.as_deref().unwrap_or(DEFAULT_SPLIT_KEY)
    }

    pub fn next_window_key(&self) -> &str {
        self.next_window_key
            .as_deref()
            .unwrap_or(DEFAULT_NEXT_WINDOW_KEY)
    }

    pub fn tmux_command(&self) -> &str {
        self.tmux_command.as_deref().unwrap_or(DEFAULT_TMUX_COMMAND)
    }

    /// The fallback directory with a leading `~` expanded.
    pub fn fallback_directory(&self) -> PathBuf {
        expand_tilde(
            self.fallback_directory
                .as_deref()
                .unwrap_or(DEFAULT_FALLBACK_DIRECTORY),
        )
    }

    /// A copy with every optional value replaced by its effective value.
    pub fn resolved(&self) -> Self {
        Self {
            prefix_key: Some(self.prefix_key().to_string()),
            new_tab_key: Some(self.new_tab_key().to_string()),
            split_key: Some(self.split_key().to_string()),
            next_window_key: Some(self.next_window_key().to_string()),
            fallback_directory: Some(self.fallback_directory().to_string_lossy().into_owned()),
            directory_policy: self.directory_policy,
            navigation: self.navigation,
            tmux_command: Some(self.tmux_command().to_string()),
        }
    }

    /// Load configuration from an explicit path, or from the global location.
    ///
    /// A missing file yields the defaults. An explicitly named file must exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        debug!(explicit = ?explicit, "config:loading");
        let config = match explicit {
            Some(path) => Self::load_from_path(path)?
                .ok_or_else(|| anyhow::anyhow!("Config file not found: {}", path.display()))?,
            None => Self::load_global()?.unwrap_or_default(),
        };
        config.validate()?;
        debug!(
            policy = ?config.directory_policy,
            navigation = ?config.navigation,
            "config:loaded"
        );
        Ok(config)
    }

    /// Check that every key and the fallback directory are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("prefix_key", &self.prefix_key),
            ("new_tab_key", &self.new_tab_key),
            ("split_key", &self.split_key),
            ("next_window_key", &self.next_window_key),
            ("fallback_directory", &self.fallback_directory),
            ("tmux_command", &self.tmux_command),
        ];
        for (name, value) in fields {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::EmptyValue(name));
            }
        }
        if self.prefix_key() == self.next_window_key() {
            return Err(ConfigError::ConflictingKeys(self.prefix_key().to_string()));
        }
        Ok(())
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        debug!(path = %path.display(), "config:reading file");
        let contents = fs::read_to_string(path)?;
        // serde_yaml rejects an empty document; treat it as all defaults
        if contents.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config at {}: {}", path.display(), e))?;
        Ok(Some(config))
    }

    /// Load the global configuration file from the XDG config directory.
    fn load_global() -> anyhow::Result<Option<Self>> {
        for dir in global_config_dirs() {
            for name in ["config.yaml", "config.yml"] {
                let candidate = dir.join(name);
                if candidate.exists() {
                    return Self::load_from_path(&candidate);
                }
            }
        }
        Ok(None)
    }
}

/// Candidate directories for the global config, most specific first.
fn global_config_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(config_home) = env::var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        dirs.push(PathBuf::from(config_home).join("edmux"));
    }
    // ~/.config/edmux works on every platform
    if let Some(home_dir) = home::home_dir() {
        dirs.push(home_dir.join(".config/edmux"));
    }
    dirs
}

/// Expand a leading `~` or `~/` to the home directory.
/// Paths without a leading tilde, and tildes when no home is known, pass through.
pub fn expand_tilde(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return PathBuf::from(raw),
    };
    match home::home_dir() {
        Some(home_dir) if rest.is_empty() => home_dir,
        Some(home_dir) => home_dir.join(rest.trim_start_matches('/')),
        None => PathBuf::from(raw),
    }
}
