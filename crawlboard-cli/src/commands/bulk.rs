//! Bulk command handlers
//!
//! Selects jobs either by id or by everything visible under a filter, then
//! applies one action to the whole selection.

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use crawlboard_core::dto::job::ListQuery;
use crawlboard_core::selection::{BulkAction, Selection};

use crate::commands::render::print_bulk_report;
use crate::config::Config;
use crate::id_resolver::resolve_job_ids;

/// Bulk subcommands
#[derive(Subcommand)]
pub enum BulkCommands {
    /// Start every selected job
    Start(Target),
    /// Stop every selected job
    Stop(Target),
    /// Rerun every selected job
    Rerun(Target),
    /// Delete every selected job
    Delete(Target),
}

/// Which jobs a bulk command selects
#[derive(clap::Args)]
pub struct Target {
    /// Job IDs or unambiguous prefixes
    ids: Vec<String>,

    /// Select every job matching the filter instead of listing ids
    #[arg(long, conflicts_with = "ids")]
    all: bool,

    /// Status filter for --all
    #[arg(long, requires = "all")]
    status: Option<String>,

    /// Search filter for --all
    #[arg(long, requires = "all")]
    search: Option<String>,
}

impl BulkCommands {
    fn split(self) -> (BulkAction, Target) {
        match self {
            BulkCommands::Start(target) => (BulkAction::Start, target),
            BulkCommands::Stop(target) => (BulkAction::Stop, target),
            BulkCommands::Rerun(target) => (BulkAction::Rerun, target),
            BulkCommands::Delete(target) => (BulkAction::Delete, target),
        }
    }
}

/// Handle bulk commands
pub async fn handle_bulk_command(command: BulkCommands, config: &Config) -> Result<()> {
    let client = config.client();
    let (action, target) = command.split();

    let mut selection = Selection::new();

    if target.all {
        let filter = ListQuery {
            status: target.status,
            search: target.search,
        }
        .to_filter()?;
        let visible = client.list_jobs(&filter).await?;
        selection.select_all(visible.iter().map(|job| job.id));
    } else {
        if target.ids.is_empty() {
            bail!("Give at least one job ID, or --all");
        }
        for id in resolve_job_ids(&client, &target.ids).await? {
            selection.set(id, true);
        }
    }

    if selection.is_empty() {
        println!("{}", "No jobs selected.".yellow());
        return Ok(());
    }

    println!("{}", format!("Applying {} to {} job(s)...", action, selection.len()).bold());

    let report = client.bulk(&selection, action).await?;
    print_bulk_report(&report);

    Ok(())
}
