//! Key bindings edmux asks the host editor to install.
//!
//! The router never touches global state. The host passes in its own key
//! table, gets back an `Installation` recording what was displaced, and hands
//! that back to restore the previous bindings when the mode is disabled.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::Config;

/// Actions reachable through a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyAction {
    NewTab,
    Split,
    NextWindow,
}

impl KeyAction {
    /// The edmux subcommand that performs this action.
    pub fn subcommand(self) -> &'static str {
        match self {
            Self::NewTab => "new-tab",
            Self::Split => "split",
            Self::NextWindow => "next-window",
        }
    }

    /// Command line the host binds the key to.
    pub fn command_line(self) -> String {
        format!("edmux {}", self.subcommand())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    /// Key sequence in editor notation, chords separated by spaces
    pub keys: String,
    pub action: KeyAction,
}

/// A host-owned mapping from key sequence to command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    entries: BTreeMap<String, String>,
}

impl KeyTable {
    pub fn get(&self, keys: &str) -> Option<&str> {
        self.entries.get(keys).map(String::as_str)
    }

    /// Bind `keys`, returning the command it was bound to before.
    pub fn bind(&mut self, keys: &str, command: &str) -> Option<String> {
        self.entries.insert(keys.to_string(), command.to_string())
    }

    pub fn unbind(&mut self, keys: &str) -> Option<String> {
        self.entries.remove(keys)
    }
}

impl FromIterator<(String, String)> for KeyTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The set of bindings edmux provides.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    bindings: Vec<KeyBinding>,
}

impl KeyRouter {
    pub fn from_config(config: &Config) -> Self {
        let prefixed = |key: &str| format!("{} {}", config.prefix_key(), key);
        Self {
            bindings: vec![
                KeyBinding {
                    keys: prefixed(config.new_tab_key()),
                    action: KeyAction::NewTab,
                },
                KeyBinding {
                    keys: prefixed(config.split_key()),
                    action: KeyAction::Split,
                },
                KeyBinding {
                    keys: config.next_window_key().to_string(),
                    action: KeyAction::NextWindow,
                },
            ],
        }
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Bind every edmux key in `table`, remembering what each one replaced.
    pub fn install(&self, table: &mut KeyTable) -> Installation {
        let displaced = self
            .bindings
            .iter()
            .map(|b| {
                let previous = table.bind(&b.keys, &b.action.command_line());
                (b.keys.clone(), previous)
            })
            .collect();
        Installation { displaced }
    }
}

/// Record of one `install`, needed to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    displaced: Vec<(String, Option<String>)>,
}

impl Installation {
    /// Put back every binding that `install` replaced.
    pub fn restore(self, table: &mut KeyTable) {
        // Reverse order so a key bound twice ends up with its original command
        for (keys, previous) in self.displaced.into_iter().rev() {
            match previous {
                Some(command) => {
                    table.bind(&keys, &command);
                }
                None => {
                    table.unbind(&keys);
                }
            }
        }
    }
}
