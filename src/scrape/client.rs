use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::parser::{DocketTableParser, ResultsParser};
use super::CaseSource;
use crate::case::CaseRecord;
use crate::error::ScrapeError;

/// Search endpoint to hit when nothing is configured. Placeholder domain:
/// point `search.base_url` at the docket portal you are actually targeting.
pub const DEFAULT_BASE_URL: &str = "https://www.example-court-data.com/search";

/// Conventional desktop-browser identification; court portals tend to serve
/// reduced or empty markup to obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.4896.127 Safari/537.36";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Search endpoint of the court site
    pub base_url: String,
    /// User agent string sent with every request
    pub user_agent: String,
    /// Hard deadline for one request, in seconds
    pub timeout_secs: u64,
    /// Lower bound of the pre-request throttle window, in milliseconds
    pub delay_min_ms: u64,
    /// Upper bound of the pre-request throttle window, in milliseconds
    pub delay_max_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            delay_min_ms: 2000,
            delay_max_ms: 5000,
        }
    }
}

/// HTTP acquisition client for the court docket site.
///
/// Every fetch waits out a randomized throttle delay, issues exactly one GET
/// with the search term as a query parameter, and hands the body to the
/// configured [`ResultsParser`]. Failures come back as [`ScrapeError`]
/// values; nothing is retried here and the client never touches the archive.
pub struct CourtClient {
    config: ClientConfig,
    client: Client,
    parser: Box<dyn ResultsParser>,
}

impl CourtClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_parser(config, Box::new(DocketTableParser))
    }

    /// Build a client with a site-specific extraction strategy. The
    /// throttle and transport behavior stay the same.
    pub fn with_parser(config: ClientConfig, parser: Box<dyn ResultsParser>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .build()
            .unwrap_or_default();

        Self {
            config,
            client,
            parser,
        }
    }

    /// Uniform draw from the configured throttle window.
    fn throttle_delay(&self) -> Duration {
        let min = self.config.delay_min_ms;
        let max = self.config.delay_max_ms.max(min);
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

#[async_trait]
impl CaseSource for CourtClient {
    async fn fetch(&self, search_term: &str) -> Result<Vec<CaseRecord>, ScrapeError> {
        let term = search_term.trim();
        if term.is_empty() {
            return Err(ScrapeError::InvalidInput(
                "search term cannot be empty".to_string(),
            ));
        }

        // Mandatory rate bound against the court site, applied before every
        // request, not just on repeats.
        let delay = self.throttle_delay();
        log::debug!(
            "throttling {} ms before querying court site for '{}'",
            delay.as_millis(),
            term
        );
        sleep(delay).await;

        let url = Url::parse_with_params(&self.config.base_url, &[("query", term)])
            .map_err(|e| ScrapeError::InvalidInput(format!("unusable search URL: {}", e)))?;

        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::from_request(e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpError {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::from_request(e, self.config.timeout_secs))?;

        let records = self.parser.parse(&body)?;
        log::debug!("parsed {} case record(s) for '{}'", records.len(), term);
        Ok(records)
    }
}
