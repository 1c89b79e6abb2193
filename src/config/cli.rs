use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cutlist")]
#[command(about = "Cut-list aggregation for window and door openings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: selection, aggregation, write-back
    Calculate {
        /// Path to the model document
        #[arg(short, long)]
        model: PathBuf,

        /// Settings file (defaults to the per-user location)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Print the raw calculation result as JSON
        #[arg(long)]
        json: bool,

        /// Compute and report without writing annotations back
        #[arg(long)]
        dry_run: bool,
    },

    /// List the openings and duplicate identifiers in a model document
    Selection {
        /// Path to the model document
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Inspect or initialize the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show {
        /// Settings file (defaults to the per-user location)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Write the default settings file
    Init {
        /// Settings file (defaults to the per-user location)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Print the settings file location
    Path {
        /// Settings file (defaults to the per-user location)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
}
