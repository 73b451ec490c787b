//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zomb")]
#[command(about = "Project Zomboid scriptfile scraper", long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output written by `zomb scan`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// One CSV per category
    Csv,
    /// MediaWiki tables for guns and melee weapons
    Wiki,
    /// dump.json of every record
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Wiki, ExportFormat::Json];
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape scriptfiles and export spreadsheets
    #[command(visible_alias = "s")]
    Scan {
        /// A single scriptfile to parse
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Steam workshop directory (`workshop`, `workshop/content` or `workshop/content/108600`)
        #[arg(short = 'd', long, env = "ZOMB_WORKSHOP_DIR")]
        workshop_dir: Option<PathBuf>,

        /// Output directory (uses configured default, else `output`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Formats to write (comma-separated, default: all)
        #[arg(long, value_enum, value_delimiter = ',')]
        format: Option<Vec<ExportFormat>>,

        /// Also write one gun CSV per ammo type
        #[arg(long)]
        split_guns_by_ammo: bool,
    },

    /// Parse one scriptfile and print its records as JSON
    #[command(visible_alias = "p")]
    Parse {
        /// Path to scriptfile
        file: PathBuf,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Add a path component to skip while scanning (repeatable)
        #[arg(long)]
        blacklist: Vec<String>,

        /// Remove every blacklist entry
        #[arg(long)]
        clear_blacklist: bool,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
