//! ID resolver module
//!
//! Resolves short job id prefixes to full UUIDs so users can type `3f2a`
//! instead of a whole id.

use anyhow::{Context, Result, anyhow};
use crawlboard_client::CrawlboardClient;
use crawlboard_core::domain::job::Job;
use crawlboard_core::view::Filter;
use uuid::Uuid;

use crate::types::IdOrPrefix;

/// Resolve a job ID or prefix to a full UUID
///
/// Full UUIDs are returned as-is without contacting the server.
pub async fn resolve_job_id(client: &CrawlboardClient, id_or_prefix: &IdOrPrefix) -> Result<Uuid> {
    if let Some(uuid) = id_or_prefix.as_uuid() {
        return Ok(uuid);
    }

    let jobs = client
        .list_jobs(&Filter::default())
        .await
        .context("Failed to fetch jobs for ID resolution")?;

    match_prefix(&jobs, &id_or_prefix.to_string())
}

/// Resolve several ids, failing on the first one that does not resolve
pub async fn resolve_job_ids(client: &CrawlboardClient, inputs: &[String]) -> Result<Vec<Uuid>> {
    let parsed: Vec<IdOrPrefix> = inputs.iter().map(|input| IdOrPrefix::parse(input)).collect();

    if parsed.iter().all(|id| id.as_uuid().is_some()) {
        return Ok(parsed.iter().filter_map(IdOrPrefix::as_uuid).collect());
    }

    let jobs = client
        .list_jobs(&Filter::default())
        .await
        .context("Failed to fetch jobs for ID resolution")?;

    parsed
        .iter()
        .map(|id| match id.as_uuid() {
            Some(uuid) => Ok(uuid),
            None => match_prefix(&jobs, &id.to_string()),
        })
        .collect()
}

/// Find the single job whose id starts with `prefix`
fn match_prefix(jobs: &[Job], prefix: &str) -> Result<Uuid> {
    let prefix = prefix.to_lowercase();
    if prefix.is_empty() {
        return Err(anyhow!("Job ID cannot be empty"));
    }

    let matches: Vec<&Job> = jobs
        .iter()
        .filter(|j| j.id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [] => Err(anyhow!("No job found with ID starting with '{}'", prefix)),
        [job] => Ok(job.id),
        _ => {
            let ids: Vec<String> = matches.iter().map(|j| j.id.to_string()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple jobs: {}",
                prefix,
                ids.join(", ")
            ))
        }
    }
}
