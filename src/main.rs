//! # Space Search CLI (`space-search`)
//!
//! ## Usage
//!
//! ```bash
//! space-search --config ./config/space-search.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `space-search serve` | Start the HTTP API |
//! | `space-search sources` | Print every catalog record |
//! | `space-search get <id>` | Print one catalog record in full |
//! | `space-search search "<query>"` | Rank catalog records against a query |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use space_search::{config, search, server, sources, telemetry};

/// Space Search: browse and keyword-search a catalog of space imagery.
#[derive(Parser)]
#[command(
    name = "space-search",
    about = "Space Search: browse and keyword-search a catalog of space imagery",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/space-search.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API.
    ///
    /// Loads the catalog, binds to `[server].bind`, and serves until
    /// interrupted. Search history lives in memory only.
    Serve,

    /// Print every catalog record.
    Sources,

    /// Print one catalog record in full.
    Get {
        /// Catalog id, as shown by `sources`.
        id: u64,
    },

    /// Search the catalog and print ranked results.
    ///
    /// An empty query lists the whole catalog. Nothing is written to
    /// search history.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results to print.
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    telemetry::init(&cfg.log)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Get { id } => {
            sources::run_get(&cfg, id)?;
        }
        Commands::Search { query, limit } => {
            search::run_search(&cfg, &query, limit)?;
        }
    }

    Ok(())
}
