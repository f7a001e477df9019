use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use crate::config::Config;
use crate::keymap::{KeyAction, KeyRouter, KeyTable};

/// One edmux binding and what the host must do with it.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct KeyReport {
    pub keys: String,
    pub action: KeyAction,
    /// Command to bind while edmux is enabled
    pub enable: String,
    /// Command to restore on disable; None means unbind
    pub disable: Option<String>,
}

pub fn run(config: &Config, bound: &[(String, String)], json: bool) -> Result<()> {
    let reports = plan(&KeyRouter::from_config(config), bound);

    if json {
        let out = serde_json::to_string_pretty(&reports).context("Failed to encode bindings")?;
        println!("{out}");
        return Ok(());
    }

    for report in &reports {
        println!(
            "{}\t{}\t{}",
            report.keys,
            report.enable,
            report.disable.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Install the router into a copy of the host's table, then restore it, and
/// report both states for every edmux key.
pub fn plan(router: &KeyRouter, bound: &[(String, String)]) -> Vec<KeyReport> {
    let mut table: KeyTable = bound.iter().cloned().collect();
    let installation = router.install(&mut table);
    let enabled = table.clone();
    installation.restore(&mut table);

    router
        .bindings()
        .iter()
        .map(|binding| KeyReport {
            keys: binding.keys.clone(),
            action: binding.action,
            // Later bindings win when two share a key sequence
            enable: enabled
                .get(&binding.keys)
                .map(str::to_string)
                .unwrap_or_else(|| binding.action.command_line()),
            disable: table.get(&binding.keys).map(str::to_string),
        })
        .collect()
}

/// Parse a `KEYS=COMMAND` pair describing one of the host's current bindings.
pub fn parse_binding(raw: &str) -> Result<(String, String)> {
    let (keys, command) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEYS=COMMAND, got '{raw}'"))?;
    let (keys, command) = (keys.trim(), command.trim());
    if keys.is_empty() || command.is_empty() {
        return Err(anyhow!("expected KEYS=COMMAND, got '{raw}'"));
    }
    Ok((keys.to_string(), command.to_string()))
}
