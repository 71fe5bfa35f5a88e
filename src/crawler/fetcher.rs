//! HTTP fetcher implementation
//!
//! This module handles every HTTP request of the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests returning the page body
//! - Error classification (status, timeout, transport)
//!
//! There are no retries: a failed navigation is reported once to the caller.

use crate::config::ClientConfig;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Issues one navigation per request and hands back the page body
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    log_visits: bool,
}

impl Fetcher {
    /// Creates a fetcher from the client configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use thesis_harvester::config::ClientConfig;
    /// use thesis_harvester::crawler::Fetcher;
    ///
    /// let fetcher = Fetcher::new(&ClientConfig::default()).unwrap();
    /// ```
    pub fn new(config: &ClientConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(config)?,
            log_visits: config.log_visits,
        })
    }

    /// Fetches `url` and returns the response body
    ///
    /// Non-success statuses, timeouts and transport failures all come back as
    /// errors carrying the failing URL.
    pub async fn fetch(&self, url: &str) -> Result<String, HarvestError> {
        if self.log_visits {
            tracing::info!("Visiting {}", url);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;
        tracing::trace!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy.
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Maps a transport error onto the crate error for `url`
fn classify_error(url: &str, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else if let Some(status) = error.status() {
        HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
