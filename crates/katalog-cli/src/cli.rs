//! CLI structure and argument parsing for `katalog`.
//!
//! The tool is an operator's window into the content backend: it runs the
//! same fetch/normalize pipeline the site runs and prints what the site
//! would render. Collection commands degrade the way the library does — a
//! broken backend prints an empty result, not a stack trace — while `show`
//! exits non-zero when the path resolves to nothing, so scripts can probe
//! for the existence of a route.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and sync promo-catalog content from the CMS backend.
#[derive(Debug, Parser)]
#[command(name = "katalog", version, about)]
pub struct Cli {
    /// Path to a katalog.toml config file (defaults to the platform config
    /// dir; `KATALOG_*` environment variables override either).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug-level logging.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List catalog cards for one store-category id, newest first.
    List {
        /// Category term identifier to filter by.
        category_id: String,
    },
    /// Show the detail entity behind one canonical path.
    Show {
        /// Canonical path, with or without the leading slash.
        path: String,
    },
    /// Enumerate every static detail route across all collection pages.
    Routes,
    /// Print the site metadata singleton.
    Site,
    /// Print the main navigation menu.
    Menu,
    /// Print the promotional banner slides.
    Slides,
    /// List store-logo cards for a category name.
    Logos {
        /// Category display name, e.g. "Minimarket".
        category_name: String,
    },
}
