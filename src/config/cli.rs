use crate::config::{OutputFormat, Overrides};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "college-finder")]
#[command(about = "Browse college cutoff ranks, find eligible colleges and compare them")]
pub struct CliConfig {
    /// Path or http(s) URL of college_data.json
    #[arg(long, global = true)]
    pub data: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every category code in the dataset
    Categories,

    /// List every institute code and name
    Institutes,

    /// Find colleges where a rank meets the closing rank for a category
    Search {
        #[arg(long, allow_hyphen_values = true)]
        rank: Option<String>,

        /// Category code; falls back to display.default_category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a college's branch-wise cutoff ranks
    Details { code: String },

    /// Compare colleges side by side
    Compare {
        /// Comma-separated college codes
        #[arg(long, default_value = "")]
        colleges: String,

        /// Add a college to the comparison
        #[arg(long)]
        add: Option<String>,

        /// Remove a college from the comparison
        #[arg(long)]
        remove: Option<String>,
    },

    /// Best closing rank recorded for a category
    MinRank { category: String },

    /// Check the dataset for duplicate codes and out-of-range values
    Validate,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data: self.data.clone(),
            format: self.format,
            verbose: self.verbose,
        }
    }
}
