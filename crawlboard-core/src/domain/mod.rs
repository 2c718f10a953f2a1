//! Core domain types
//!
//! The crawl job record, its analysis payload, the status lifecycle that
//! governs it and the ordered collection that owns every live record.

pub mod collection;
pub mod job;
pub mod lifecycle;
pub mod payload;
