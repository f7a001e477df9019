use crate::command::args::{ContextArgs, LayoutArgs};
use crate::navigation::NavigationStyle;
use crate::{command, config};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "edmux")]
#[command(about = "Uniform window, split and tab keystrokes across an editor and tmux")]
struct Cli {
    /// Read configuration from this file instead of ~/.config/edmux/config.yaml
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new tmux window in the directory resolved for the current buffer
    NewTab {
        #[command(flatten)]
        context: ContextArgs,
    },

    /// Split the current tmux pane side by side in the resolved directory
    Split {
        #[command(flatten)]
        context: ContextArgs,
    },

    /// Route a "next window" keystroke; prints editor, multiplexer or editor+multiplexer
    NextWindow {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Override the configured navigation style
        #[arg(long, value_enum)]
        style: Option<NavigationStyle>,

        /// Decide and print the action without calling tmux
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the directory a new pane would open in
    ResolveDir {
        #[command(flatten)]
        context: ContextArgs,
    },

    /// Print the key bindings to install, and what to restore when disabling
    Keys {
        /// An existing host binding, as KEYS=COMMAND (repeatable)
        #[arg(long = "bound", value_parser = command::keys::parse_binding)]
        bound: Vec<(String, String)>,

        /// Emit JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Completions must work even with a broken config file
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let cfg = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::NewTab { context } => command::new_tab::run(&cfg, &context),
        Commands::Split { context } => command::split::run(&cfg, &context),
        Commands::NextWindow {
            layout,
            style,
            dry_run,
        } => command::next_window::run(&cfg, &layout, style, dry_run),
        Commands::ResolveDir { context } => command::resolve_dir::run(&cfg, &context),
        Commands::Keys { bound, json } => command::keys::run(&cfg, &bound, json),
        Commands::Config => command::show_config::run(&cfg),
        Commands::Completions { .. } => Ok(()),
    }
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
