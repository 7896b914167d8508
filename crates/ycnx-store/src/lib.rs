//! YCNX Storage Layer
//!
//! Implements the `PeriodStore` trait on SQLite.
//!
//! # Architecture
//!
//! - One table, `lottery_results`, with a uniqueness constraint on `period_id`
//! - Append-only: the store offers no update or delete
//! - Duplicate inserts are rejected by the constraint, not by a prior lookup
//!
//! # Examples
//!
//! ```no_run
//! use ycnx_store::SqliteStore;
//!
//! let store = SqliteStore::new("ycnx_data.db").unwrap();
//! // Store is now ready for period operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::{error, warn};
use ycnx_domain::traits::PeriodStore;
use ycnx_domain::{PeriodRecord, StoredRecord};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record for the period already exists
    #[error("Period {0} already stored")]
    Duplicate(u64),

    /// A value does not fit the signed 64-bit integer column
    #[error("Period {period_id}: {column} = {value} exceeds the integer column range")]
    OutOfRange {
        /// Period of the rejected record
        period_id: u64,
        /// Column the value was bound to
        column: &'static str,
        /// The offending value
        value: u64,
    },
}

/// Convert an unsigned count for an INTEGER column, refusing to wrap
fn to_column(period_id: u64, column: &'static str, value: u64) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::OutOfRange {
        period_id,
        column,
        value,
    })
}

/// Read an INTEGER column back as an unsigned count
fn count_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, value))
}

const SELECT_COLUMNS: &str = "SELECT id, period_id, batch_no, period_name, draw_date, total_applied,
        quota_total, total_won, total_lost, win_rate, pdf_url, updated_at
 FROM lottery_results";

/// SQLite-based implementation of PeriodStore
///
/// # Thread Safety
///
/// The store owns its connection and can be moved between threads, but not
/// shared; wrap it in a mutex to use it from several tasks.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ycnx_store::SqliteStore;
    ///
    /// let store = SqliteStore::new(":memory:").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Insert a record, reporting why it was rejected
    pub fn try_insert(&mut self, record: &PeriodRecord) -> Result<(), StoreError> {
        let id = record.period_id;
        let period_id = to_column(id, "period_id", record.period_id)?;
        let total_applied = to_column(id, "total_applied", record.total_applied)?;
        let quota_total = to_column(id, "quota_total", record.quota_total)?;
        let total_won = to_column(id, "total_won", record.total_won)?;
        let total_lost = to_column(id, "total_lost", record.total_lost)?;

        let result = self.conn.execute(
            "INSERT INTO lottery_results
             (period_id, batch_no, period_name, draw_date, total_applied,
              quota_total, total_won, total_lost, win_rate, pdf_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                period_id,
                &record.batch_no,
                &record.period_name,
                &record.draw_date,
                total_applied,
                quota_total,
                total_won,
                total_lost,
                &record.win_rate,
                &record.pdf_url,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StoreError::Duplicate(record.period_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch the stored record for a period
    pub fn get(&self, period_id: u64) -> Result<Option<StoredRecord>, StoreError> {
        let Ok(key) = i64::try_from(period_id) else {
            return Ok(None);
        };
        let sql = format!("{} WHERE period_id = ?1", SELECT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, params![key], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    /// Number of stored periods
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM lottery_results", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
        Ok(StoredRecord {
            id: row.get(0)?,
            record: PeriodRecord {
                period_id: count_column(row, 1)?,
                batch_no: row.get(2)?,
                period_name: row.get(3)?,
                draw_date: row.get(4)?,
                total_applied: count_column(row, 5)?,
                quota_total: count_column(row, 6)?,
                total_won: count_column(row, 7)?,
                total_lost: count_column(row, 8)?,
                win_rate: row.get(9)?,
                pdf_url: row.get(10)?,
            },
            updated_at: row.get(11)?,
        })
    }
}

impl PeriodStore for SqliteStore {
    type Error = StoreError;

    fn exists(&self, period_id: u64) -> Result<bool, Self::Error> {
        // Ids past the column range can never have been stored
        let Ok(key) = i64::try_from(period_id) else {
            return Ok(false);
        };
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM lottery_results WHERE period_id = ?1",
                params![key],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(found)
    }

    fn insert(&mut self, record: &PeriodRecord) -> bool {
        match self.try_insert(record) {
            Ok(()) => true,
            Err(StoreError::Duplicate(period_id)) => {
                warn!("Period {} already exists, skipping write", period_id);
                false
            }
            Err(e) => {
                error!("Failed to store period {}: {}", record.period_id, e);
                false
            }
        }
    }

    fn list_all_descending(&self) -> Result<Vec<StoredRecord>, Self::Error> {
        let sql = format!("{} ORDER BY period_id DESC", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
