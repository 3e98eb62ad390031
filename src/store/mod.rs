use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::case::CaseRecord;
use crate::error::StoreError;

/// Outcome of an archive write.
///
/// `Inserted` carries the stored form of the record (timestamp assigned);
/// `Duplicate` means the case number was already on file and the write was
/// silently ignored. The first-written version of a record always wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted(CaseRecord),
    Duplicate,
}

/// SQLite-backed archive of acquired case records.
///
/// Holds only the database path; each operation opens its own connection
/// inside `spawn_blocking` so the async callers never block on SQLite.
/// Uniqueness of `case_number` is enforced by the schema, not by
/// application-level checks, so concurrent writers cannot both insert the
/// same case.
#[derive(Debug, Clone)]
pub struct CaseStore {
    db_path: PathBuf,
}

impl CaseStore {
    /// Open (or create) the case database and make sure the schema exists.
    pub async fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!(
                        "failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let store = Self {
            db_path: db_path.clone(),
        };

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = open_connection(&db_path)?;
            initialize_schema(&conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("database task failed: {}", e)))??;

        Ok(store)
    }

    /// Insert a record unless its case number is already on file.
    ///
    /// The write is a single `INSERT OR IGNORE`, so the presence check and
    /// the insert are atomic with respect to other connections. A duplicate
    /// is an expected outcome and never modifies the existing row.
    pub async fn put_if_absent(&self, record: CaseRecord) -> Result<WriteOutcome, StoreError> {
        if record.case_number.trim().is_empty() {
            return Err(StoreError::SchemaViolation(
                "case record requires a non-empty case number".to_string(),
            ));
        }

        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<WriteOutcome, StoreError> {
            let conn = open_connection(&db_path)?;
            let scraped_at = Utc::now();

            let affected = conn.execute(
                r#"
                INSERT OR IGNORE INTO cases (case_number, party_names, filing_date, status, scraped_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    record.case_number,
                    record.party_names,
                    record.filing_date,
                    record.status,
                    scraped_at.to_rfc3339(),
                ],
            )?;

            if affected == 0 {
                log::debug!("duplicate case number skipped: {}", record.case_number);
                return Ok(WriteOutcome::Duplicate);
            }

            Ok(WriteOutcome::Inserted(CaseRecord {
                scraped_at: Some(scraped_at),
                ..record
            }))
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("database task failed: {}", e)))?
    }

    /// All archived cases, most recently stored first.
    ///
    /// Each call materializes a fresh snapshot; rowid breaks ties between
    /// records stored within the same timestamp.
    pub async fn list_all(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<CaseRecord>, StoreError> {
            let conn = open_connection(&db_path)?;

            let mut stmt = conn.prepare(
                r#"
                SELECT case_number, party_names, filing_date, status, scraped_at
                FROM cases
                ORDER BY scraped_at DESC, id DESC
                "#,
            )?;

            let rows = stmt.query_map([], |row| {
                let scraped_at: String = row.get(4)?;
                let scraped_at = DateTime::parse_from_rfc3339(&scraped_at)
                    .map_err(|_| {
                        rusqlite::Error::InvalidColumnType(
                            4,
                            "scraped_at".to_string(),
                            rusqlite::types::Type::Text,
                        )
                    })?
                    .with_timezone(&Utc);

                Ok(CaseRecord {
                    case_number: row.get(0)?,
                    party_names: row.get(1)?,
                    filing_date: row.get(2)?,
                    status: row.get(3)?,
                    scraped_at: Some(scraped_at),
                })
            })?;

            let mut cases = Vec::new();
            for row in rows {
                cases.push(row?);
            }

            Ok(cases)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("database task failed: {}", e)))?
    }

    /// Number of cases on file.
    pub async fn count(&self) -> Result<u64, StoreError> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || -> Result<u64, StoreError> {
            let conn = open_connection(&db_path)?;
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM cases", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("database task failed: {}", e)))?
    }
}

fn open_connection(db_path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(db_path)
        .map_err(|e| StoreError::Unavailable(format!("failed to open {}: {}", db_path.display(), e)))?;
    // WAL keeps concurrent search invocations from tripping over each other;
    // the busy timeout covers the brief writer lock hand-off.
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    Ok(conn)
}

fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS cases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            case_number TEXT NOT NULL UNIQUE,
            party_names TEXT,
            filing_date TEXT,
            status TEXT,
            scraped_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_cases_scraped_at ON cases(scraped_at);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (CaseStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CaseStore::open(temp_dir.path().join("cases.db"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    fn record(case_number: &str) -> CaseRecord {
        CaseRecord::new(
            case_number,
            Some("John Doe vs. Jane Smith".to_string()),
            Some("2023-01-15".to_string()),
            Some("Closed".to_string()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn put_assigns_timestamp_on_insert() {
        let (store, _dir) = create_test_store().await;

        match store.put_if_absent(record("123-ABC-456")).await.unwrap() {
            WriteOutcome::Inserted(stored) => {
                assert_eq!(stored.case_number, "123-ABC-456");
                assert!(stored.scraped_at.is_some());
            }
            WriteOutcome::Duplicate => panic!("first write must insert"),
        }
    }

    #[tokio::test]
    async fn duplicate_write_is_ignored_and_first_wins() {
        let (store, _dir) = create_test_store().await;

        store.put_if_absent(record("123-ABC-456")).await.unwrap();

        let mut changed = record("123-ABC-456");
        changed.party_names = Some("Someone Else vs. Another".to_string());
        let outcome = store.put_if_absent(changed).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Duplicate);

        let cases = store.list_all().await.unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(
            cases[0].party_names.as_deref(),
            Some("John Doe vs. Jane Smith")
        );
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let (store, _dir) = create_test_store().await;

        store.put_if_absent(record("CASE-1")).await.unwrap();
        store.put_if_absent(record("CASE-2")).await.unwrap();
        store.put_if_absent(record("CASE-3")).await.unwrap();

        let cases = store.list_all().await.unwrap();
        let numbers: Vec<_> = cases.iter().map(|c| c.case_number.as_str()).collect();
        assert_eq!(numbers, vec!["CASE-3", "CASE-2", "CASE-1"]);
    }

    #[tokio::test]
    async fn blank_case_number_is_a_schema_violation() {
        let (store, _dir) = create_test_store().await;

        let mut bad = record("placeholder");
        bad.case_number = "  ".to_string();

        match store.put_if_absent(bad).await {
            Err(StoreError::SchemaViolation(_)) => {}
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn archive_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("cases.db");

        {
            let store = CaseStore::open(&db_path).await.unwrap();
            store.put_if_absent(record("123-ABC-456")).await.unwrap();
        }

        let store = CaseStore::open(&db_path).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.list_all().await.unwrap()[0].case_number, "123-ABC-456");
    }

    #[tokio::test]
    async fn unusable_path_reports_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-directory");
        std::fs::write(&blocker, b"occupied").unwrap();

        match CaseStore::open(blocker.join("cases.db")).await {
            Err(StoreError::Unavailable(_)) => {}
            other => panic!("expected unavailable, got {:?}", other),
        }
    }
}
