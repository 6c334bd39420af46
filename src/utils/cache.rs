//! Address Snapshot Cache
//!
//! SQLite table `address_cache(address, data, timestamp)` holding the last
//! primary-provider snapshot per address.
//!
//! Notes:
//! - Every call opens its own connection and closes it on return
//! - Writes are `INSERT OR REPLACE`, so the last writer wins
//! - The request path only writes; nothing reads a snapshot back before
//!   refetching

use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::BlockchainSnapshot;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS address_cache \
     (address TEXT PRIMARY KEY, data TEXT, timestamp INTEGER)";

/// One cached row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSnapshot {
    pub snapshot: BlockchainSnapshot,
    /// Capture time, epoch seconds
    pub timestamp: i64,
}

/// Handle to the cache database file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: Arc<PathBuf>,
}

impl SnapshotStore {
    /// Open (creating if needed) the cache database and its table
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = Self {
            path: Arc::new(path.as_ref().to_path_buf()),
        };
        store.with_connection(|conn| conn.execute_batch(SCHEMA))?;
        info!("💾 Snapshot cache ready at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_connection<T, F>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(self.path.as_path()).map_err(|e| {
            AppError::with_source(
                ErrorCode::StorageError,
                format!("failed to open cache database {}", self.path.display()),
                e,
            )
        })?;
        Ok(op(&conn)?)
    }

    /// Store a snapshot, replacing any previous row for the address
    pub fn put_blocking(
        &self,
        address: &str,
        snapshot: &BlockchainSnapshot,
        timestamp: i64,
    ) -> AppResult<()> {
        let data = serde_json::to_string(snapshot)?;
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO address_cache VALUES (?1, ?2, ?3)",
                params![address, data, timestamp],
            )
        })?;
        debug!("💾 CACHE SET: {}", address);
        Ok(())
    }

    pub fn count_blocking(&self) -> AppResult<u64> {
        let count: i64 = self.with_connection(|conn| {
            conn.query_row("SELECT COUNT(*) FROM address_cache", [], |row| row.get(0))
        })?;
        Ok(count.max(0) as u64)
    }

    pub fn get_blocking(&self, address: &str) -> AppResult<Option<CachedSnapshot>> {
        let row: Option<(String, i64)> = self.with_connection(|conn| {
            conn.query_row(
                "SELECT data, timestamp FROM address_cache WHERE address = ?1",
                params![address],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
        })?;

        match row {
            Some((data, timestamp)) => Ok(Some(CachedSnapshot {
                snapshot: serde_json::from_str(&data)?,
                timestamp,
            })),
            None => Ok(None),
        }
    }

    // ============================================
    // Async wrappers (run SQLite on the blocking pool)
    // ============================================

    pub async fn put(
        &self,
        address: &str,
        snapshot: &BlockchainSnapshot,
        timestamp: i64,
    ) -> AppResult<()> {
        let store = self.clone();
        let address = address.to_string();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || store.put_blocking(&address, &snapshot, timestamp))
            .await?
    }

    pub async fn count(&self) -> AppResult<u64> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.count_blocking()).await?
    }

    pub async fn get(&self, address: &str) -> AppResult<Option<CachedSnapshot>> {
        let store = self.clone();
        let address = address.to_string();
        tokio::task::spawn_blocking(move || store.get_blocking(&address)).await?
    }
}
