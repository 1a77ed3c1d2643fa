//! Remote EDA endpoint construction and retrieval.
//!
//! Every EDA event publishes two documents under a fixed notice host: a JSON
//! configuration and a companion shell-profile fragment. URL construction is
//! pure and deterministic; retrieval distinguishes unreachable hosts, non-200
//! responses, and malformed JSON as separate typed errors.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::config::EdaConfig;
use crate::error::ClabError;

/// Fixed base of the lab notice server.
pub const NOTICE_BASE: &str = "https://clab-notice.lcpu.dev";

const TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 2000;

/// Documents never get large; a lab config past this size is broken.
const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// The two per-event endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdaEndpoints {
    pub config_url: String,
    pub bashrc_url: String,
}

impl EdaEndpoints {
    /// Build both endpoint URLs for an event name.
    ///
    /// The name must already be validated (see
    /// [`crate::installer::validate_event_name`]); this function is pure.
    pub fn for_event(name: &str) -> Self {
        Self {
            config_url: format!("{}/eda/{}.json", NOTICE_BASE, name),
            bashrc_url: format!("{}/eda/{}.bashrc", NOTICE_BASE, name),
        }
    }
}

/// HTTP client for fetching EDA documents.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with default timeout and user agent.
    pub fn new() -> Result<Self, ClabError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("clabcli/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClabError::Network {
                url: NOTICE_BASE.to_string(),
                source: e,
            })?;
        Ok(Self { client })
    }

    /// Fetch and parse the JSON configuration for an event.
    pub async fn fetch_config(&self, endpoints: &EdaEndpoints) -> Result<EdaConfig, ClabError> {
        info!("Fetching config from {}", endpoints.config_url);
        let body = self.fetch_with_retry(&endpoints.config_url).await?;
        serde_json::from_str(&body).map_err(|e| ClabError::MalformedConfig {
            url: endpoints.config_url.clone(),
            reason: e.to_string(),
        })
    }

    /// Fetch the raw shell-profile fragment for an event.
    pub async fn fetch_bashrc(&self, endpoints: &EdaEndpoints) -> Result<String, ClabError> {
        info!("Fetching profile fragment from {}", endpoints.bashrc_url);
        self.fetch_with_retry(&endpoints.bashrc_url).await
    }

    /// Fetch both documents for an event.
    pub async fn fetch_event(
        &self,
        endpoints: &EdaEndpoints,
    ) -> Result<(EdaConfig, String), ClabError> {
        tokio::try_join!(self.fetch_config(endpoints), self.fetch_bashrc(endpoints))
    }

    /// GET a URL with retry and backoff, mapping failures to typed errors.
    async fn fetch_with_retry(&self, url: &str) -> Result<String, ClabError> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = RETRY_DELAY_MS * (1 << (attempt - 1));
                debug!("Retry {} after {}ms for {}", attempt, delay, url);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        // A definitive server answer; retrying won't change it.
                        return Err(ClabError::HttpStatus {
                            url: url.to_string(),
                            status,
                        });
                    }

                    let body = response.text().await.map_err(|e| ClabError::Network {
                        url: url.to_string(),
                        source: e,
                    })?;

                    if body.len() > MAX_RESPONSE_SIZE {
                        return Err(ClabError::MalformedConfig {
                            url: url.to_string(),
                            reason: format!(
                                "response too large: {} bytes (max {})",
                                body.len(),
                                MAX_RESPONSE_SIZE
                            ),
                        });
                    }

                    return Ok(body);
                }
                Err(e) => {
                    last_error = Some(ClabError::Network {
                        url: url.to_string(),
                        source: e,
                    });
                }
            }
        }

        // MAX_RETRIES is nonzero, so last_error is set on this path.
        Err(last_error.expect("retry loop ran at least once"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_deterministic() {
        let a = EdaEndpoints::for_event("edaempyren2025summer");
        let b = EdaEndpoints::for_event("edaempyren2025summer");
        assert_eq!(a, b);
        assert_eq!(
            a.config_url,
            "https://clab-notice.lcpu.dev/eda/edaempyren2025summer.json"
        );
        assert_eq!(
            a.bashrc_url,
            "https://clab-notice.lcpu.dev/eda/edaempyren2025summer.bashrc"
        );
    }

    #[test]
    fn test_endpoints_differ_per_event() {
        let a = EdaEndpoints::for_event("spring");
        let b = EdaEndpoints::for_event("summer");
        assert_ne!(a.config_url, b.config_url);
        assert_ne!(a.bashrc_url, b.bashrc_url);
    }

    #[test]
    fn test_endpoints_share_fixed_host() {
        let endpoints = EdaEndpoints::for_event("anything");
        assert!(endpoints.config_url.starts_with(NOTICE_BASE));
        assert!(endpoints.bashrc_url.starts_with(NOTICE_BASE));
        assert!(endpoints.config_url.ends_with(".json"));
        assert!(endpoints.bashrc_url.ends_with(".bashrc"));
    }

    #[test]
    fn test_fetcher_constructs() {
        assert!(Fetcher::new().is_ok());
    }
}
