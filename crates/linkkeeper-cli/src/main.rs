//! linkkeeper CLI
//!
//! Command-line interface for linkkeeper - local-first bookmark
//! management.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use linkkeeper_core::{Config, StorageError, Store};

mod commands;
mod images;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linkkeeper")]
#[command(about = "linkkeeper - local-first bookmark management")]
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
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// List all categories
    Categories,
    /// Merge links from a JSON export file
    Import {
        /// Path of the file to import
        file: PathBuf,
    },
    /// Export all links to a JSON file
    Export {
        /// Destination path (defaults to linkkeeper-export.json)
        file: Option<PathBuf>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (storage location, link and category counts)
    Status,
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Save a new link
    #[command(alias = "create")]
    Add(AddArgs),
    /// List links
    #[command(alias = "ls")]
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive search over title, URL and description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show link details
    Show {
        /// Link ID (full id or prefix)
        id: String,
    },
    /// Edit a link (prompts interactively when no field flag is given)
    Edit(EditArgs),
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (full id or prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Open a link in the browser
    Open {
        /// Link ID (full id or prefix)
        id: String,
    },
}

#[derive(Args)]
struct AddArgs {
    /// URL to save
    url: String,
    /// Display title
    #[arg(short, long)]
    title: String,
    /// Category label
    #[arg(short, long)]
    category: String,
    /// Description text
    #[arg(short, long)]
    description: Option<String>,
    /// Remote image URL for the thumbnail
    #[arg(long, conflicts_with = "image_file")]
    image_url: Option<String>,
    /// Local image file to inline as a base64 payload
    #[arg(long)]
    image_file: Option<PathBuf>,
}

#[derive(Args)]
struct EditArgs {
    /// Link ID (full id or prefix)
    id: String,
    /// New title
    #[arg(short, long)]
    title: Option<String>,
    /// New URL
    #[arg(short, long)]
    url: Option<String>,
    /// New category
    #[arg(short, long)]
    category: Option<String>,
    /// New description
    #[arg(short, long)]
    description: Option<String>,
    /// New remote image URL
    #[arg(long, conflicts_with = "image_file")]
    image_url: Option<String>,
    /// New image file to inline as a base64 payload
    #[arg(long)]
    image_file: Option<PathBuf>,
    /// Remove the stored image
    #[arg(long, conflicts_with_all = ["image_url", "image_file"])]
    clear_image: bool,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        if let Some(hint) = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<StorageError>())
            .and_then(StorageError::recovery_suggestion)
        {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load().context("Failed to load configuration")?;
    let mut store = Store::open_with_config(config)?;

    // First launch seeds the collection with a few sample links
    store.ensure_seed_data()?;
    tracing::debug!("store opened with {} link(s)", store.link_count());

    match cli.command {
        Commands::Link { command } => handle_link_command(command, &mut store, &output),
        Commands::Categories => commands::category::list(&store, &output),
        Commands::Import { file } => commands::import::run(&mut store, file, &output),
        Commands::Export { file } => commands::export::run(&store, file, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&store, &output),
    }
}

fn handle_link_command(command: LinkCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        LinkCommands::Add(args) => commands::link::add(store, args, output),
        LinkCommands::List { category, search } => {
            commands::link::list(store, category, search, output)
        }
        LinkCommands::Show { id } => commands::link::show(store, id, output),
        LinkCommands::Edit(args) => commands::link::edit(store, args, output),
        LinkCommands::Delete { id, force } => commands::link::delete(store, id, force, output),
        LinkCommands::Open { id } => commands::link::open(store, id, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
