//! Configuration module
//!
//! Handles CLI configuration: where the server lives and how to authenticate.

use crawlboard_client::CrawlboardClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Crawlboard server
    pub server_url: String,
    /// Bearer token for the API
    pub token: String,
}

impl Config {
    /// Build an API client for this configuration
    pub fn client(&self) -> CrawlboardClient {
        CrawlboardClient::new(&self.server_url, &self.token)
    }
}
