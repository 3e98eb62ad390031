//! End-to-end search run: fetch from a [`CaseSource`], archive through a
//! [`CaseStore`], and report what happened.

use crate::case::CaseRecord;
use crate::error::{Result, ScrapeError};
use crate::scrape::CaseSource;
use crate::store::{CaseStore, WriteOutcome};

/// Outcome of one [`Pipeline::run`].
#[derive(Debug)]
pub struct RunReport {
    /// Records inserted on this run, with their archive timestamps.
    pub written: Vec<CaseRecord>,
    /// Fetched records that were already archived and left untouched.
    pub duplicates: u32,
    /// Set when the fetch itself failed. Nothing was written in that case.
    pub source_error: Option<ScrapeError>,
}

impl RunReport {
    /// Total records the source returned on this run.
    pub fn fetched(&self) -> usize {
        self.written.len() + self.duplicates as usize
    }

    fn from_source_error(err: ScrapeError) -> Self {
        Self {
            written: Vec::new(),
            duplicates: 0,
            source_error: Some(err),
        }
    }
}

/// Coordinates a source and a store without owning any of their policy.
///
/// Fetch failures are part of the report so the caller can decide how loud
/// to be about them; store failures abort the run because continuing after
/// one would drop records silently. Rows committed before a store failure
/// stay committed.
pub struct Pipeline {
    source: Box<dyn CaseSource>,
    store: CaseStore,
}

impl Pipeline {
    pub fn new(source: Box<dyn CaseSource>, store: CaseStore) -> Self {
        Self { source, store }
    }

    /// Run one search for `term` and archive every new record it returns.
    pub async fn run(&self, term: &str) -> Result<RunReport> {
        let records = match self.source.fetch(term).await {
            Ok(records) => records,
            Err(e) => {
                log::warn!("fetch failed, nothing archived: {}", e);
                return Ok(RunReport::from_source_error(e));
            }
        };

        log::info!("fetched {} record(s) for '{}'", records.len(), term);

        let mut written = Vec::new();
        let mut duplicates = 0u32;
        for record in records {
            match self.store.put_if_absent(record).await? {
                WriteOutcome::Inserted(stored) => written.push(stored),
                WriteOutcome::Duplicate => duplicates += 1,
            }
        }

        Ok(RunReport {
            written,
            duplicates,
            source_error: None,
        })
    }
}
