//! Crawlboard Core
//!
//! Core types and the result-set management logic for the Crawlboard dashboard.
//!
//! This crate contains:
//! - Domain types: crawl jobs, their analysis payload and status lifecycle
//! - Views: filtering, sorting, pagination and status counts over a job set
//! - Selection: the selected subset and bulk actions applied over it
//! - Simulation: injectable clock and random source, synthetic payloads
//! - DTOs: request/response shapes shared by the server and its clients
//!
//! Nothing in here performs I/O; the server owns the collection and drives time.

pub mod domain;
pub mod dto;
pub mod error;
pub mod selection;
pub mod simulation;
pub mod view;

pub use error::CrawlError;
