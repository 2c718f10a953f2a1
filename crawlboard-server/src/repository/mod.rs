//! Repository Module
//!
//! Data access layer for the server. The job repository is the single owner
//! of the job collection; the API, the service layer and the crawl scheduler
//! all reach the jobs through it.
//!
//! The repository is trait-based so the scheduler and services can be tested
//! against any implementation.

pub mod job;

// Re-export for convenience
pub use job::{InMemoryJobRepository, JobRepository};
