mod cli;
mod cmd;
mod command;
mod config;
mod directory;
mod keymap;
mod logger;
mod multiplexer;
mod navigation;

use anyhow::Result;
use tracing::{error, info};

fn main() -> Result<()> {
    // Logging is optional; a broken state dir must not cost the keystroke
    logger::init();
    info!(args = ?std::env::args().collect::<Vec<_>>(), "edmux start");

    match cli::run() {
        Ok(result) => {
            info!("edmux finished successfully");
            Ok(result)
        }
        Err(err) => {
            error!(error = ?err, "edmux failed");
            Err(err)
        }
    }
}
