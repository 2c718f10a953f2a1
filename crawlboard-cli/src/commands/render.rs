//! Terminal rendering shared by the job and bulk commands

use colored::*;
use crawlboard_core::domain::job::{Job, JobStatus};
use crawlboard_core::selection::BulkReport;
use crawlboard_core::view::{Page, StatusCounts};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Queued => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Error => status_str.red(),
        JobStatus::Stopped => status_str.dimmed(),
    }
}

fn short_id(job: &Job) -> String {
    job.id.to_string()[..8].to_string()
}

/// One table row per job
pub fn print_job_row(job: &Job) {
    let title = job.title().unwrap_or("-");
    let links = match &job.data {
        Some(data) => format!("{}/{}", data.internal_links, data.external_links),
        None => "-".to_string(),
    };

    println!(
        "  {} {:<10} {:<40} {:<36} {:>7}  {}",
        short_id(job).dimmed(),
        colorize_status(job.status),
        job.url,
        title,
        links,
        job.created_at.format(TIME_FORMAT).to_string().dimmed()
    );
}

pub fn print_table_header() {
    println!(
        "  {:<8} {:<10} {:<40} {:<36} {:>7}  {}",
        "ID".bold(),
        "STATUS".bold(),
        "URL".bold(),
        "TITLE".bold(),
        "INT/EXT".bold(),
        "CREATED".bold()
    );
}

/// Print the rows of a page plus its position line
pub fn print_page(page: &Page<Job>) {
    match page.range() {
        None => println!("{}", "No results found.".yellow()),
        Some((first, last)) => {
            print_table_header();
            for job in &page.items {
                print_job_row(job);
            }
            println!();
            println!(
                "Showing {}-{} of {} result(s), page {}/{}",
                first, last, page.total_items, page.page, page.total_pages
            );
        }
    }
}

/// Print detailed job information
pub fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.id.to_string().cyan());
    println!("  URL:         {}", job.url);
    println!("  Status:      {}", colorize_status(job.status));
    println!("  Created:     {}", job.created_at.format(TIME_FORMAT));

    if let Some(started) = job.started_at {
        println!("  Started:     {}", started.format(TIME_FORMAT));
    }

    if let Some(completed) = job.completed_at {
        println!("  Completed:   {}", completed.format(TIME_FORMAT));
    }

    if let Some(duration) = job.duration() {
        println!("  Duration:    {}s", duration.num_seconds());
    }

    let Some(data) = &job.data else {
        return;
    };

    println!("\n{}", "Analysis:".bold());
    println!("  Title:        {}", data.title);
    println!("  HTML version: {}", data.html_version);
    println!(
        "  Login form:   {}",
        if data.has_login_form {
            "✓".green()
        } else {
            "✗".dimmed()
        }
    );

    let headings = data.heading_counts.as_array();
    let headings: Vec<String> = headings
        .iter()
        .enumerate()
        .map(|(i, count)| format!("h{}={}", i + 1, count))
        .collect();
    println!("  Headings:     {}", headings.join(" "));
    println!(
        "  Links:        {} internal, {} external",
        data.internal_links, data.external_links
    );

    if data.broken_links.is_empty() {
        println!("  Broken links: {}", "none".green());
    } else {
        println!("  Broken links:");
        for link in &data.broken_links {
            let code = link.status_code.to_string();
            let code = if link.is_server_error() { code.red() } else { code.yellow() };
            println!("    {} {}", code, link.url);
        }
    }
}

/// One line of per-status totals
pub fn print_counts(counts: &StatusCounts) {
    let parts: Vec<String> = counts
        .by_status()
        .iter()
        .map(|(status, count)| format!("{} {}", colorize_status(*status), count))
        .collect();

    println!("{} total | {}", counts.total.to_string().bold(), parts.join(" | "));
}

/// Summary of a batch action
pub fn print_bulk_report(report: &BulkReport) {
    println!(
        "{} {}: {} applied, {} skipped, {} missing",
        "✓".green(),
        report.action.as_str().bold(),
        report.applied.len(),
        report.skipped.len(),
        report.missing.len()
    );

    for id in &report.skipped {
        println!("  {} {} (not applicable)", "-".dimmed(), id.to_string().dimmed());
    }
    for id in &report.missing {
        println!("  {} {} (no longer exists)", "?".yellow(), id);
    }
}
