//! SQLite persistence for fetched quotations.
//!
//! Connections come from an r2d2 pool. Each new pooled connection ensures the
//! `quotations` table exists, so the table is in place before any insert. An insert
//! runs on the blocking pool inside an immediate transaction under a stage deadline.
//! A progress handler aborts the statement once the deadline passes, the interrupt
//! handle stops it from the async side, and the commit only happens while the
//! deadline still holds. The checked-out connection goes back to the pool when the
//! blocking task ends, on every path.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use quotation_common::{Deadline, Quotation, QuotationError, Result, Stage};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, InterruptHandle, TransactionBehavior, params};
use tokio::sync::oneshot;
use tokio::time::{Instant, timeout_at};

use crate::model::record::PersistedRecord;

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS quotations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        value REAL,
        date_created TIMESTAMP
    );
";

const INSERT: &str = "INSERT INTO quotations (name, value, date_created) VALUES (?1, ?2, ?3)";

/// VM instructions between deadline checks while a statement runs.
const PROGRESS_STEPS: i32 = 100;

/// How long opening the pool may wait for its initial connections.
const OPEN_TIMEOUT: Duration = Duration::from_secs(5);

fn storage_error<E: Display>(err: E) -> QuotationError {
    QuotationError::Storage(err.to_string())
}

/// Pooled SQLite datastore.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` with up to `pool_size` connections.
    pub fn open(path: impl AsRef<Path>, pool_size: u32) -> Result<Self> {
        let path = path.as_ref();
        let manager =
            SqliteConnectionManager::file(path).with_init(|conn| conn.execute_batch(CREATE_TABLE));
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(OPEN_TIMEOUT)
            .build(manager)
            .map_err(storage_error)?;
        debug!("Datastore {} opened with {} connections", path.display(), pool_size);
        Ok(Self { pool })
    }

    /// Insert the quotation's name and bid before `deadline`.
    ///
    /// The result always matches the table: `Ok` means the row is committed, and
    /// `DeadlineExceeded(Persist)` means the transaction was rolled back. After the
    /// deadline fires, the call waits for the blocking insert to unwind so that the
    /// pooled connection is back in the pool before it returns.
    pub async fn insert(&self, quotation: &Quotation, deadline: Deadline) -> Result<PersistedRecord> {
        if deadline.is_expired() {
            warn!("No budget left for insert in SQLite");
            return Err(QuotationError::DeadlineExceeded(Stage::Persist));
        }
        let name = quotation.name.clone();
        let value = quotation.bid_value()?;
        let pool = self.pool.clone();
        let (handle_tx, mut handle_rx) = oneshot::channel();

        let mut task = tokio::task::spawn_blocking(move || {
            insert_blocking(&pool, name, value, deadline, handle_tx)
        });

        let joined = match timeout_at(Instant::from_std(deadline.instant()), &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                if let Ok(handle) = handle_rx.try_recv() {
                    handle.interrupt();
                }
                warn!("Timeout exceeded for insert in SQLite, rolling back");
                task.await
            }
        };
        joined.map_err(|e| QuotationError::Storage(format!("insert task failed: {}", e)))?
    }

    /// Number of stored rows.
    pub fn count(&self) -> Result<u64> {
        let conn = self.pool.get().map_err(storage_error)?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM quotations", [], |row| row.get(0))
            .map_err(storage_error)?;
        Ok(count as u64)
    }

    /// Up to `limit` most recent rows, newest first.
    pub fn latest(&self, limit: usize) -> Result<Vec<PersistedRecord>> {
        let conn = self.pool.get().map_err(storage_error)?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, value, date_created FROM quotations ORDER BY id DESC LIMIT ?1",
            )
            .map_err(storage_error)?;
        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok(PersistedRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    value: row.get(2)?,
                    date_created: row.get(3)?,
                })
            })
            .map_err(storage_error)?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>().map_err(storage_error)?;
        Ok(records)
    }
}

/// Failure inside the blocking insert: past the deadline every failure is a timeout.
fn insert_error<E: Display>(deadline: Deadline, err: E) -> QuotationError {
    if deadline.is_expired() {
        QuotationError::DeadlineExceeded(Stage::Persist)
    } else {
        storage_error(err)
    }
}

/// Runs on the blocking pool. The connection returns to the pool when this returns.
fn insert_blocking(
    pool: &Pool<SqliteConnectionManager>,
    name: String,
    value: f64,
    deadline: Deadline,
    handle_tx: oneshot::Sender<InterruptHandle>,
) -> Result<PersistedRecord> {
    let mut conn = pool
        .get_timeout(deadline.remaining())
        .map_err(|e| insert_error(deadline, e))?;
    let _ = handle_tx.send(conn.get_interrupt_handle());

    conn.progress_handler(PROGRESS_STEPS, Some(move || deadline.is_expired()));
    let written = write_row(&mut conn, &name, value, deadline);
    conn.progress_handler(0, None::<fn() -> bool>);

    let (id, date_created) = written?;
    Ok(PersistedRecord {
        id,
        name,
        value,
        date_created,
    })
}

/// Insert inside an immediate transaction, committing only while the deadline holds.
fn write_row(
    conn: &mut Connection,
    name: &str,
    value: f64,
    deadline: Deadline,
) -> Result<(i64, DateTime<Utc>)> {
    // busy_timeout truncates to whole milliseconds.
    conn.busy_timeout(deadline.remaining() + Duration::from_millis(1))
        .map_err(|e| insert_error(deadline, e))?;
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| insert_error(deadline, e))?;

    let date_created = Utc::now();
    tx.execute(INSERT, params![name, value, date_created])
        .map_err(|e| insert_error(deadline, e))?;
    let id = tx.last_insert_rowid();

    // Dropping the transaction rolls it back.
    if deadline.is_expired() {
        return Err(QuotationError::DeadlineExceeded(Stage::Persist));
    }
    tx.commit().map_err(|e| insert_error(deadline, e))?;
    Ok((id, date_created))
}
