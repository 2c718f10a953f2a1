//! Crawl scheduler
//!
//! Drives the simulated crawl: per-job auto-start timers and a single
//! periodic tick that completes running jobs with synthetic results.

pub mod clock;
pub mod simulator;

pub use clock::TokioClock;
pub use simulator::{CrawlScheduler, SchedulerSettings};
