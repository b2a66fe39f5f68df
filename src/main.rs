//! # clipshelf CLI (`clip`)
//!
//! Filter and browse a folder of saved web clips.
//!
//! ## Usage
//!
//! ```bash
//! clip --config ./config/clip.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `clip sources` | Show the configured collection and whether it is readable |
//! | `clip search "<query>"` | Print the clips matching a query, newest first |
//! | `clip browse` | Live session: every line typed on stdin re-runs the query |
//! | `clip completions <shell>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! # Everything, newest first (capped at display.max_results)
//! clip search ""
//!
//! # Clips mentioning "borrow", as an HTML fragment
//! clip search borrow --format html > clips.html
//!
//! # Interactive
//! clip browse
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use clipshelf::config::{self, OutputFormat};
use clipshelf::{logging, search, sources};

/// clipshelf: filter and browse a folder of saved web clips.
///
/// All commands read a TOML configuration file naming the vault root and
/// the clip folder. See `config/clip.example.toml`.
#[derive(Parser)]
#[command(
    name = "clip",
    about = "clipshelf: filter and browse a folder of saved web clips",
    version,
    long_about = "clipshelf shows the clips in one folder of a Markdown vault whose title, \
    author or description contain a query, newest first, with links to the original page \
    and to the local note."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/clip.toml")]
    config: PathBuf,

    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show the configured collection and its health.
    Sources,

    /// Print the clips matching a query.
    ///
    /// The query is matched case-sensitively, as a substring of
    /// title + author + description. An empty query matches every titled clip.
    Search {
        /// Literal query text.
        query: String,

        /// Maximum number of rows (overrides `display.max_results`).
        #[arg(long)]
        limit: Option<usize>,

        /// Output format (overrides `display.format`).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Interactive browsing.
    ///
    /// Shows every clip first, then re-runs the query for each line read
    /// from stdin. Ends at EOF (Ctrl-D).
    Browse {
        /// Maximum number of rows (overrides `display.max_results`).
        #[arg(long)]
        limit: Option<usize>,

        /// Output format (overrides `display.format`).
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Commands that don't require config
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "clip", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Search {
            query,
            limit,
            format,
        } => {
            search::run_search(&cfg, &query, limit, format)?;
        }
        Commands::Browse { limit, format } => {
            search::run_browse(&cfg, limit, format)?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
