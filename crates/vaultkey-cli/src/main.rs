//! vaultkey CLI
//!
//! Command-line front end for vaultkey: search notes, open the daily note,
//! capture text, and drive the launcher interactively.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vaultkey_core::Config;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "vaultkey")]
#[command(about = "vaultkey - Launcher companion for Markdown note vaults")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find notes by name
    #[command(alias = "on")]
    Search {
        /// Search text (empty lists every note)
        query: Vec<String>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Find notes by content
    #[command(alias = "os")]
    Grep {
        /// Text to look for
        query: Vec<String>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Open today's daily note
    #[command(alias = "od")]
    Daily {
        /// Vault name (defaults to the first configured vault)
        #[arg(long)]
        vault: Option<String>,
        /// Print the link instead of opening it
        #[arg(long)]
        print: bool,
    },
    /// Append text to the quick capture note
    #[command(alias = "oq")]
    Capture {
        /// Text to capture
        text: Vec<String>,
        /// Target note (defaults to quick_capture_note, then the daily note)
        #[arg(short, long)]
        note: Option<String>,
        /// Vault name (defaults to the first configured vault)
        #[arg(long)]
        vault: Option<String>,
    },
    /// Append text to a specific note
    Append {
        /// Note name, vault-relative path or absolute path
        note: String,
        /// Text to append
        text: Vec<String>,
        /// Vault name (defaults to the first configured vault)
        #[arg(long)]
        vault: Option<String>,
    },
    /// Create a note and open it
    #[command(alias = "new")]
    Create {
        /// Note name
        name: String,
        /// Vault name (defaults to the first configured vault)
        #[arg(long)]
        vault: Option<String>,
        /// Print the link instead of opening it
        #[arg(long)]
        print: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Run the launcher interactively (default)
    Interactive {
        /// Print links instead of opening them
        #[arg(long)]
        print: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (vaults, result_limit, quick_capture_note,
        /// log_file, keywords.search, keywords.search_content,
        /// keywords.daily, keywords.capture)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work on the file itself
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())?;
    init_logging(&config);

    match cli.command {
        None => commands::interactive::run(config, false, &output),
        Some(Commands::Interactive { print }) => commands::interactive::run(config, print, &output),
        Some(Commands::Search { query, limit }) => {
            commands::search::by_name(&config, &query.join(" "), limit, &output)
        }
        Some(Commands::Grep { query, limit }) => {
            commands::search::by_content(&config, &query.join(" "), limit, &output)
        }
        Some(Commands::Daily { vault, print }) => {
            commands::daily::open(&config, vault.as_deref(), print, &output)
        }
        Some(Commands::Capture { text, note, vault }) => commands::capture::quick(
            &config,
            &text.join(" "),
            note.as_deref(),
            vault.as_deref(),
            &output,
        ),
        Some(Commands::Append { note, text, vault }) => {
            commands::capture::append(&config, &note, &text.join(" "), vault.as_deref(), &output)
        }
        Some(Commands::Create { name, vault, print }) => {
            commands::capture::create(&config, &name, vault.as_deref(), print, &output)
        }
        Some(Commands::Config { .. }) => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Set up file logging when VAULTKEY_LOG is set
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("VAULTKEY_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory {:?}: {}", parent, e);
            return;
        }
    }

    let log_file = match File::options().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "vaultkey_core={},vaultkey_cli={}",
        log_level, log_level
    ));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    info!("Logging to {:?}", log_path);
}
