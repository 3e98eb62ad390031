use thiserror::Error;

/// Failures raised while acquiring case data from the court site.
///
/// None of these are retried internally; callers decide whether a failed
/// fetch is worth repeating.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid search term: {0}")]
    InvalidInput(String),

    #[error("Could not reach the court site: {0}")]
    NetworkUnreachable(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Court site returned HTTP {status}")]
    HttpError { status: u16 },

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

impl ScrapeError {
    /// Classify a reqwest failure into the scrape taxonomy.
    ///
    /// Timeouts are reported against the configured deadline; everything
    /// else at the transport level counts as the site being unreachable.
    pub fn from_request(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::NetworkUnreachable(err.to_string())
        }
    }
}

/// Failures raised by the case archive.
///
/// Duplicate case numbers are deliberately absent here: an ignored write is
/// a normal outcome, not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Case database unavailable: {0}")]
    Unavailable(String),

    #[error("Case record rejected: {0}")]
    SchemaViolation(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum DocketError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

impl DocketError {
    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Scrape(ScrapeError::NetworkUnreachable(_)) => {
                Some("Check your internet connection and the configured search.base_url.".to_string())
            }
            Self::Scrape(ScrapeError::Timeout(_)) => {
                Some("The court site is slow right now. Try again later or raise search.timeout_secs.".to_string())
            }
            Self::Scrape(ScrapeError::HttpError { status }) if *status == 429 => {
                Some("The court site is rate limiting requests. Widen the search.delay window before retrying.".to_string())
            }
            Self::Scrape(ScrapeError::ParseError(_)) => {
                Some("The site layout may have changed. Run with --verbose to inspect what was received.".to_string())
            }
            Self::Store(StoreError::Unavailable(_)) => {
                Some("Check that database.path points to a writable location ('docket config get database.path').".to_string())
            }
            Self::Config(_) => {
                Some("Run 'docket config path' to locate the configuration file.".to_string())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrape_errors_render_their_context() {
        let err = ScrapeError::HttpError { status: 503 };
        assert_eq!(err.to_string(), "Court site returned HTTP 503");

        let err = ScrapeError::Timeout(15);
        assert!(err.to_string().contains("15 seconds"));
    }

    #[test]
    fn store_errors_wrap_into_docket_error() {
        let err: DocketError = StoreError::Unavailable("disk full".to_string()).into();
        assert!(err.to_string().contains("disk full"));
        assert!(err.hint().unwrap().contains("database.path"));
    }

    #[test]
    fn rate_limit_hint_mentions_delay_window() {
        let err: DocketError = ScrapeError::HttpError { status: 429 }.into();
        assert!(err.hint().unwrap().contains("delay"));

        let err: DocketError = ScrapeError::HttpError { status: 404 }.into();
        assert!(err.hint().is_none());
    }
}
