use anyhow::{Context, Result};

use crate::config::Config;

/// Print the effective configuration, defaults filled in, as YAML.
pub fn run(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(&config.resolved()).context("Failed to encode config")?;
    print!("{yaml}");
    Ok(())
}
