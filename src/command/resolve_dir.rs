use anyhow::Result;

use super::args::ContextArgs;
use crate::config::Config;

pub fn run(config: &Config, context: &ContextArgs) -> Result<()> {
    println!("{}", context.pane_directory(config).display());
    Ok(())
}
