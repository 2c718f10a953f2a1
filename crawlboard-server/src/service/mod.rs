//! Service Module
//!
//! Business logic layer for the server.
//! Services coordinate the repository and the crawl scheduler.

pub mod job;

// Re-export for convenience
pub use job as job_service;
