//! Crawlboard HTTP Client
//!
//! A small, type-safe HTTP client for the Crawlboard server API, used by the
//! command-line dashboard.
//!
//! # Example
//!
//! ```no_run
//! use crawlboard_client::CrawlboardClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CrawlboardClient::new("http://localhost:8080", "dev-token");
//!
//!     let job = client.create_job("https://example.com").await?;
//!     println!("Queued {} ({})", job.url, job.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// HTTP client for the Crawlboard API
///
/// Every request except the health check carries the bearer token.
#[derive(Debug, Clone)]
pub struct CrawlboardClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// Bearer token sent with every request
    token: String,
    /// HTTP client instance
    client: Client,
}

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl CrawlboardClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use crawlboard_client::CrawlboardClient;
    ///
    /// let client = CrawlboardClient::new("http://localhost:8080", "dev-token");
    /// ```
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(&self.token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(&self.token)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(&self.token)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(&self.token)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from(status.as_u16(), response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Turn a failed response into a [`ClientError`], preferring the server's message
    async fn error_from(status: u16, response: reqwest::Response) -> ClientError {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::debug!("API error {}: {}", status, text);

        ClientError::from_status(status, error_message(&text))
    }
}

/// Message from a `{"error": "..."}` body, or the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|body| body.error)
        .unwrap_or_else(|_| body.to_string())
}
