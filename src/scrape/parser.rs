//! Extraction of case records from docket search result pages.
//!
//! The expected markup is a results table with one row per case:
//!
//! ```html
//! <table class="results">
//!   <tr class="case-row">
//!     <td class="case-number">123-ABC-456</td>
//!     <td class="parties">John Doe vs. Jane Smith</td>
//!     <td class="filed">2023-01-15</td>
//!     <td class="status">Closed</td>
//!   </tr>
//! </table>
//! ```
//!
//! Searches that match nothing render a `div.no-results` banner instead of
//! the table. Anything else is treated as an unrecognized page.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::case::CaseRecord;
use crate::error::ScrapeError;

static RESULTS_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.results").expect("valid selector"));
static CASE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.case-row").expect("valid selector"));
static CASE_NUMBER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".case-number").expect("valid selector"));
static PARTIES: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".parties").expect("valid selector"));
static FILED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".filed").expect("valid selector"));
static STATUS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".status").expect("valid selector"));
static NO_RESULTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.no-results").expect("valid selector"));

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("valid date pattern"));

/// Strategy for turning a results page body into case records.
///
/// Court portals differ wildly in markup. The fetch/throttle side of the
/// client is fixed; adapting to another portal means swapping this one
/// seam.
pub trait ResultsParser: Send + Sync {
    /// Extract zero or more records from `html`.
    ///
    /// A page that clearly reports "no matches" yields `Ok` with an empty
    /// vec; a page whose structure is not recognized at all is a
    /// [`ScrapeError::ParseError`].
    fn parse(&self, html: &str) -> Result<Vec<CaseRecord>, ScrapeError>;
}

/// Default parser for the docket portal's results table.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocketTableParser;

impl ResultsParser for DocketTableParser {
    fn parse(&self, html: &str) -> Result<Vec<CaseRecord>, ScrapeError> {
        let document = Html::parse_document(html);

        if document.select(&NO_RESULTS).next().is_some() {
            return Ok(Vec::new());
        }

        let table = document.select(&RESULTS_TABLE).next().ok_or_else(|| {
            ScrapeError::ParseError(
                "no results table in response; the site layout may have changed".to_string(),
            )
        })?;

        let mut records = Vec::new();
        for row in table.select(&CASE_ROW) {
            let Some(case_number) = cell_text(row, &CASE_NUMBER) else {
                log::warn!("skipping result row without a case number");
                continue;
            };

            let filing_date = cell_text(row, &FILED).map(|raw| normalize_filing_date(&raw));

            match CaseRecord::new(
                case_number,
                cell_text(row, &PARTIES),
                filing_date,
                cell_text(row, &STATUS),
            ) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("skipping unusable result row: {}", e),
            }
        }

        Ok(records)
    }
}

/// Collapsed text content of the first cell matching `selector`, or `None`
/// when the cell is absent or blank.
fn cell_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let cell = row.select(selector).next()?;
    let text = cell
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Pull an ISO-8601 day out of surrounding cell text ("Filed 2023-01-15"
/// becomes "2023-01-15"); cells without one pass through untouched.
fn normalize_filing_date(raw: &str) -> String {
    ISO_DATE
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| raw.to_string())
}
