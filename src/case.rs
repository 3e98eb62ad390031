use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// One court case entry as acquired from the docket site.
///
/// The case number is the sole identity of a record: the archive ignores any
/// later write carrying a number it already holds. Everything else is
/// best-effort text lifted from the results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Unique case number, e.g. "123-ABC-456"
    pub case_number: String,
    /// Free-text party names, e.g. "John Doe vs. Jane Smith"
    pub party_names: Option<String>,
    /// Filing date as an ISO-8601 day (YYYY-MM-DD) when the site provides one
    pub filing_date: Option<String>,
    /// Case status as reported by the site (Active, Closed, Pending, ...).
    /// Open string set: the source defines no validation, so neither do we.
    pub status: Option<String>,
    /// Set by the archive when the record is first stored; never supplied
    /// by the acquisition side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
}

impl CaseRecord {
    /// Build a record from parsed page fields.
    ///
    /// Rejects a blank case number up front so malformed rows never make it
    /// to the archive boundary.
    pub fn new(
        case_number: impl Into<String>,
        party_names: Option<String>,
        filing_date: Option<String>,
        status: Option<String>,
    ) -> Result<Self> {
        let case_number = case_number.into();
        if case_number.trim().is_empty() {
            return Err(StoreError::SchemaViolation(
                "case record requires a non-empty case number".to_string(),
            )
            .into());
        }
        Ok(Self {
            case_number,
            party_names,
            filing_date,
            status,
            scraped_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_minimal_record() {
        let record = CaseRecord::new("123-ABC-456", None, None, None).unwrap();
        assert_eq!(record.case_number, "123-ABC-456");
        assert!(record.scraped_at.is_none());
    }

    #[test]
    fn new_rejects_blank_case_number() {
        assert!(CaseRecord::new("", None, None, None).is_err());
        assert!(CaseRecord::new("   ", None, None, None).is_err());
    }

    #[test]
    fn unscraped_record_serializes_without_timestamp() {
        let record = CaseRecord::new(
            "789-XYZ-012",
            Some("Acme Corp vs. Beta Ltd".to_string()),
            Some("2024-03-20".to_string()),
            Some("Active".to_string()),
        )
        .unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("789-XYZ-012"));
        assert!(!json.contains("scraped_at"));
    }
}
