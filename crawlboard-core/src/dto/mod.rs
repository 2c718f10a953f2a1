//! Data Transfer Objects
//!
//! Request and response shapes exchanged between the Crawlboard server and
//! its clients. Query-string types convert into the typed view structures in
//! [`crate::view`], rejecting unknown names with [`crate::CrawlError::InvalidQuery`].

pub mod job;
