use clap::{Args, Subcommand};

/// Search command arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term (case number, party name, keyword)
    pub term: String,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

/// List command arguments
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show at most this many cases
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Configuration command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., search.delay_min_ms)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value, or all of them
    Get {
        /// Configuration key (omit to show every key)
        key: Option<String>,
    },

    /// Show configuration file path
    Path,

    /// Initialize configuration
    Init,
}
