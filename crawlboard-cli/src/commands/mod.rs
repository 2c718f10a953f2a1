//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod bulk;
mod job;
mod render;

pub use bulk::BulkCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Crawl job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Apply one action to many jobs
    Bulk {
        #[command(subcommand)]
        command: BulkCommands,
    },
    /// Show job counts per status
    Overview,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Bulk { command } => bulk::handle_bulk_command(command, config).await,
        Commands::Overview => job::show_overview(config).await,
    }
}
