use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::app_config::LogLevel;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "darshan",
    version,
    about = "Cached gallery client for the shrine CMS",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the shrine CMS API.
    #[arg(long, env = "DARSHAN_API_BASE_URL", value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List public gallery items.
    List {
        /// Filter by category slug.
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of items.
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show aggregate gallery statistics.
    Stats,

    /// Upload an image file, or the current clipboard image.
    Upload {
        /// Path of the image file to upload.
        #[arg(value_name = "FILE", required_unless_present = "clipboard")]
        file: Option<PathBuf>,

        /// Name to store the image under.
        #[arg(long)]
        name: Option<String>,

        /// Upload the image currently on the clipboard instead of a file.
        #[arg(long)]
        clipboard: bool,
    },

    /// Warm the read cache with the common queries.
    Warm,
}
