use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "site-metrics")]
#[command(about = "Synthetic website analytics, generated deterministically from the domain name")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding bookmarks and theme (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Reference day for the 30-day traffic window (YYYY-MM-DD, default today in UTC)
    #[arg(long, global = true)]
    pub date: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show analytics for a website
    Analyze {
        website: String,
        /// Print the raw metrics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two websites side by side
    Compare {
        website_a: String,
        website_b: String,
        #[arg(long)]
        json: bool,
    },
    /// Manage saved websites
    Bookmark {
        #[command(subcommand)]
        action: BookmarkCommand,
    },
    /// Show or switch the chart color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
    /// Write a zipped report (JSON, CSV, TSV, chart series) for a website
    Export {
        website: String,
        /// Output directory (overrides storage.export_dir)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print a shareable link, for a website or the dashboard itself
    Share { website: Option<String> },
}

#[derive(Debug, Clone, Subcommand)]
pub enum BookmarkCommand {
    /// Analyze a website and bookmark it
    Add { website: String },
    Remove { domain: String },
    List,
    /// Open the analytics of a bookmarked website
    View { domain: String },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeCommand {
    Show,
    Toggle,
}
