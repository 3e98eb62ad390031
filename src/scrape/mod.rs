pub mod client;
pub mod parser;

pub use client::{ClientConfig, CourtClient};
pub use parser::{DocketTableParser, ResultsParser};

use async_trait::async_trait;

use crate::case::CaseRecord;
use crate::error::ScrapeError;

/// Anything that can turn a search term into case records.
///
/// The production implementation is [`CourtClient`]; tests drive the
/// pipeline with canned sources instead of a live site.
#[async_trait]
pub trait CaseSource: Send + Sync {
    /// Acquire the case records matching `search_term`.
    ///
    /// An empty result is a successful fetch that matched nothing, not an
    /// error. Implementations must not retry internally; one call means at
    /// most one attempt against the external source.
    async fn fetch(&self, search_term: &str) -> Result<Vec<CaseRecord>, ScrapeError>;
}
