#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "bookmarket")]
#[command(about = "Browse, post and remove ISBN book listings")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = toml_config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}
