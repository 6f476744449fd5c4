// src/cli.rs

//! CLI definitions for the assetfix tool
//!
//! Command-line interface definitions using clap. The command
//! implementations are in the `commands` module.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "assetfix")]
#[command(author, version)]
#[command(
    about = "Repair a corrupted asset tree and relink extensions, categories and content",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Back up the affected tables, reseed the baseline asset table and
    /// rebuild extension, category and content asset nodes
    Run {
        /// Path to the CMS SQLite database
        db_path: String,

        /// Baseline asset table SQL script
        #[arg(long, default_value = "sql/assets.sql")]
        seed: String,

        /// Fail instead of continuing when the seed script is missing or empty
        #[arg(long)]
        fail_on_missing_seed: bool,

        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}
