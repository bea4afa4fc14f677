//! Dnevnik CLI
//!
//! Command-line interface for Dnevnik - guided self-reflection
//! journaling.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dnevnik_core::{Backend, Config, EntryRepository, EntryStore, Session};

mod commands;
mod output;
mod prompt;
mod wizard;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "dnevnik")]
#[command(about = "Dnevnik - guided self-reflection journaling")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new entry (five-step wizard)
    #[command(alias = "add")]
    New,
    /// List entries grouped by day
    #[command(alias = "ls")]
    List {
        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show entry details
    Show {
        /// Entry ID (full or prefix)
        id: String,
    },
    /// Edit an entry
    Edit {
        /// Entry ID (full or prefix)
        id: String,
        /// Override the recorded date/time (RFC 3339, e.g. 2025-08-06T21:30:00Z)
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID (full or prefix)
        id: String,
    },
    /// Search entries by text
    Search {
        /// Search query
        query: String,
    },
    /// List all tags
    Tags,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the entry store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load().context("Failed to load configuration")?;
    init_logging(&config);

    let mut session = open_session(&config);

    match cli.command.unwrap_or(Commands::List { tag: None }) {
        Commands::New => wizard::run_create(&mut session, &output),
        Commands::List { tag } => commands::entry::list(&session, tag, &output),
        Commands::Show { id } => commands::entry::show(&session, id, &output),
        Commands::Edit { id, date } => wizard::run_edit(&mut session, id, date, &output),
        Commands::Delete { id } => commands::entry::delete(&mut session, id, &output),
        Commands::Search { query } => commands::entry::search(&session, query, &output),
        Commands::Tags => commands::tag::list(&session, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Build the session: probe the backend once, load the entry list
///
/// The CLI never has a host store, so the probe always lands on the
/// local file store under the configured data dir.
fn open_session(config: &Config) -> Session {
    let backend = Backend::select(None, config);
    let repository = EntryRepository::open(EntryStore::new(backend));
    tracing::debug!("loaded {} entries", repository.list().len());
    Session::new(repository)
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

/// Initialize logging from DNEVNIK_LOG, to stderr or the configured file
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("DNEVNIK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    match &config.log_file {
        Some(path) => {
            let file = match std::fs::File::create(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not create log file {:?}: {}", path, e);
                    return;
                }
            };

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(file)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
