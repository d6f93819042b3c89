pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fetcher::parallel::DEFAULT_WORKERS;

#[derive(Parser)]
#[command(name = "forestay")]
#[command(about = "Availability calendar for forest holiday homes", long_about = None)]
pub struct Cli {
    /// Number of parallel workers for fetching calendar feeds
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, global = true)]
    pub workers: usize,

    /// Config file (default: ~/.config/forestay/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List accommodations
    List,
    /// Show a month of availability for an accommodation
    Availability {
        /// Accommodation id
        id: String,
        /// Month to show as YYYY-MM (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Check whether a stay can be requested
    Check {
        /// Accommodation id
        id: String,
        /// Check-in date (YYYY-MM-DD)
        check_in: String,
        /// Check-out date (YYYY-MM-DD)
        check_out: String,
        /// Print the booking inquiry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask the local guide for tips
    Guide {
        /// Your question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Launch the interactive calendar
    Tui,
}
