//! crawler-sync
//!
//! Command-line front end for the crawler/filters sync engine.
//!
//! # Commands
//!
//! - `crawlers` - list, get, create, update, patch and delete crawlers
//! - `filters` - list, get, save, patch and delete filters
//! - `init-config` - write a default RON config file

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use sync_engine::SyncClient;

/// Synchronize crawlers and filters with the resource API.
#[derive(Parser)]
#[command(name = "crawler-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RON config file
    #[arg(global = true, short, long)]
    config: Option<PathBuf>,

    /// API base url, overrides the config file
    #[arg(global = true, long)]
    base_url: Option<String>,

    /// Also write logs to this file
    #[arg(global = true, long)]
    log_file: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawler resource
    Crawlers {
        #[command(subcommand)]
        action: CrawlerAction,
    },

    /// Filters resource
    Filters {
        #[command(subcommand)]
        action: FiltersAction,
    },

    /// Write a default config file
    InitConfig {
        /// Destination path
        #[arg(default_value = "sync.ron")]
        path: PathBuf,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub(crate) struct PageArgs {
    /// Page index, forwarded as-is
    #[arg(long)]
    page: Option<u32>,

    /// Page size, forwarded as-is
    #[arg(long)]
    size: Option<u32>,

    /// Sort expression, e.g. `id,asc`
    #[arg(long)]
    sort: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum CrawlerAction {
    /// List all crawlers
    List(PageArgs),

    /// Show one crawler
    Get { id: String },

    /// Create a crawler
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        fetch: i32,
        #[arg(long)]
        source: String,
    },

    /// Replace a crawler
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        fetch: i32,
        #[arg(long)]
        source: String,
    },

    /// Change some fields of a crawler
    Patch {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        fetch: Option<i32>,
        #[arg(long)]
        source: Option<String>,
    },

    /// Delete a crawler
    Delete { id: String },
}

#[derive(Subcommand)]
pub(crate) enum FiltersAction {
    /// List all filters
    List(PageArgs),

    /// Show one filters record
    Get { id: String },

    /// Create, or update when --id is given, linking the selected crawler
    Save {
        /// Existing filters id
        #[arg(long)]
        id: Option<i64>,

        /// Crawler id to link; empty or unknown leaves the link unset
        #[arg(long, default_value = "")]
        crawler: String,
    },

    /// Change the crawler link of a filters record
    Patch {
        id: i64,
        #[arg(long, default_value = "")]
        crawler: String,
    },

    /// Delete a filters record
    Delete { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    sync_logging::initialize(level, cli.log_file.as_deref());

    if let Commands::InitConfig { path } = &cli.command {
        return config::write_default(path);
    }

    let config = config::with_overrides(config::load(cli.config.as_deref())?, cli.base_url);
    let client = SyncClient::spawn(config)?;

    match cli.command {
        Commands::Crawlers { action } => commands::crawlers(&client, action).await,
        Commands::Filters { action } => commands::filters(&client, action).await,
        Commands::InitConfig { .. } => Ok(()),
    }
}
