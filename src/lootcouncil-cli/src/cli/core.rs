//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lootcouncil")]
#[command(about = "Raid loot-council sheets from droptimizer reports", long_about = None)]
pub struct Cli {
    /// Log classification detail (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every report in the sim list and write the council sheets
    #[command(visible_alias = "r")]
    Run {
        /// Sim list file, one "Label: <url>" per line
        #[arg(default_value = "simlist.txt")]
        sim_list: PathBuf,

        /// Content tables (tier names, bosses, sources); uses configured or built-in tables if not provided
        #[arg(long)]
        content: Option<PathBuf>,

        /// Directory for the CSV sheets (uses configured default, then the current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Spreadsheet CSV export scanned for links when the sim list can't be read
        #[arg(long, env = "LOOTCOUNCIL_SHEET_URL")]
        sheet_url: Option<String>,
    },

    /// Show how an item name resolves (tier collapse and slot)
    Resolve {
        /// Item display name, with item level (e.g. "Cauldron Champion's Legplates 441")
        name: String,

        /// Raidbots profileset key the item was simmed under
        #[arg(short, long)]
        key: Option<String>,

        /// Content tables to resolve against
        #[arg(long)]
        content: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default content tables file
        #[arg(long)]
        content: Option<PathBuf>,

        /// Set default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set default spreadsheet CSV export URL
        #[arg(long)]
        sheet_url: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
