//! Job command handlers
//!
//! Submitting URLs, browsing the job table and acting on single jobs.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use crawlboard_core::domain::lifecycle::JobAction;
use crawlboard_core::dto::job::ViewParams;

use crate::commands::render::{print_counts, print_job_details, print_page};
use crate::config::Config;
use crate::id_resolver::resolve_job_id;
use crate::types::IdOrPrefix;
use crawlboard_client::CrawlboardClient;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Submit a URL for analysis
    Submit {
        /// URL to crawl
        url: String,
    },
    /// Queue the demo URLs
    Demo,
    /// List jobs, one page at a time
    List {
        /// Only show jobs in this status (all, queued, running, completed, error, stopped)
        #[arg(long)]
        status: Option<String>,

        /// Case-insensitive text matched against URL and title
        #[arg(long)]
        search: Option<String>,

        /// Sort column (url, status, title, createdAt, internalLinks, externalLinks)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction (asc, desc)
        #[arg(long)]
        direction: Option<String>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show job details
    Show {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Start a queued or stopped job
    Start {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Stop a running job
    Stop {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Reset a job to queued, discarding its results
    Rerun {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Delete a job
    Delete {
        /// Job ID or unambiguous prefix
        id: String,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        JobCommands::Submit { url } => submit(&client, url).await,
        JobCommands::Demo => seed_demo(&client).await,
        JobCommands::List {
            status,
            search,
            sort,
            direction,
            page,
        } => {
            let params = ViewParams {
                status,
                search,
                sort,
                direction,
                page: Some(page),
            };
            list(&client, params).await
        }
        JobCommands::Show { id } => show(&client, &id).await,
        JobCommands::Start { id } => act(&client, &id, JobAction::Start).await,
        JobCommands::Stop { id } => act(&client, &id, JobAction::Stop).await,
        JobCommands::Rerun { id } => act(&client, &id, JobAction::Rerun).await,
        JobCommands::Delete { id } => delete(&client, &id).await,
    }
}

async fn submit(client: &CrawlboardClient, url: String) -> Result<()> {
    let job = client.create_job(url).await.context("Failed to submit URL")?;

    println!("{} Queued {}", "✓".green(), job.url.bold());
    println!("  ID: {}", job.id.to_string().dimmed());

    Ok(())
}

async fn seed_demo(client: &CrawlboardClient) -> Result<()> {
    let jobs = client.seed_demo().await?;

    println!("{}", format!("Queued {} demo job(s):", jobs.len()).bold());
    for job in jobs {
        println!("  {} {}", "▸".cyan(), job.url);
    }

    Ok(())
}

async fn list(client: &CrawlboardClient, params: ViewParams) -> Result<()> {
    let query = params.to_query()?;
    let view = client.view(&query).await.context("Failed to fetch job view")?;

    print_counts(&view.counts);
    println!();
    print_page(&view.page);

    Ok(())
}

async fn show(client: &CrawlboardClient, id: &str) -> Result<()> {
    let uuid = resolve_job_id(client, &IdOrPrefix::parse(id)).await?;
    let job = client.get_job(uuid).await?;

    print_job_details(&job);

    Ok(())
}

async fn act(client: &CrawlboardClient, id: &str, action: JobAction) -> Result<()> {
    let uuid = resolve_job_id(client, &IdOrPrefix::parse(id)).await?;
    let response = client.apply_action(uuid, action).await?;

    if response.applied {
        println!(
            "{} {} {}: now {}",
            "✓".green(),
            action.as_str().bold(),
            response.job.url,
            response.job.status
        );
    } else {
        println!(
            "{} {} does not apply to a {} job; nothing changed",
            "⚠".yellow(),
            action.as_str(),
            response.job.status
        );
    }

    Ok(())
}

async fn delete(client: &CrawlboardClient, id: &str) -> Result<()> {
    let uuid = resolve_job_id(client, &IdOrPrefix::parse(id)).await?;
    client.delete_job(uuid).await?;

    println!("{} Deleted {}", "✓".green(), uuid);

    Ok(())
}

/// Print per-status totals
pub async fn show_overview(config: &Config) -> Result<()> {
    let counts = config.client().stats().await?;

    print_counts(&counts);

    Ok(())
}
