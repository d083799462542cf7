//! SQLite Database
//!
//! Embedded database for in-progress snapshots using rusqlite with r2d2
//! connection pooling.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// Raw snapshot row from the database
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    pub owner: String,
    pub payload: String,
    pub saved_at: i64,
    pub updated_at: Option<String>,
}

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a database from an existing connection pool.
    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database for testing.
    ///
    /// A single pooled connection keeps every caller on the same in-memory
    /// database.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        Self::from_pool(pool)
    }

    /// Create a new database instance at the default location
    pub fn new() -> AppResult<Self> {
        let db_path = database_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        Self::from_pool(pool)
    }

    fn connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS progress_snapshots (
                owner TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                saved_at INTEGER NOT NULL,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(())
    }

    /// Insert or replace the snapshot for `owner`
    pub fn upsert_snapshot(&self, owner: &str, payload: &str, saved_at: i64) -> AppResult<()> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO progress_snapshots (owner, payload, saved_at, updated_at)
             VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
             ON CONFLICT(owner) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at,
                updated_at = CURRENT_TIMESTAMP",
            params![owner, payload, saved_at],
        )?;

        Ok(())
    }

    /// Get the snapshot row for `owner`
    pub fn get_snapshot(&self, owner: &str) -> AppResult<Option<SnapshotRow>> {
        let conn = self.connection()?;

        let result = conn.query_row(
            "SELECT owner, payload, saved_at, updated_at
             FROM progress_snapshots WHERE owner = ?1",
            params![owner],
            |row| {
                Ok(SnapshotRow {
                    owner: row.get(0)?,
                    payload: row.get(1)?,
                    saved_at: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            },
        );

        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// Delete the snapshot for `owner`; returns whether a row was removed
    pub fn delete_snapshot(&self, owner: &str) -> AppResult<bool> {
        let conn = self.connection()?;
        let deleted = conn.execute(
            "DELETE FROM progress_snapshots WHERE owner = ?1",
            params![owner],
        )?;
        Ok(deleted > 0)
    }

    /// Delete every snapshot saved before `cutoff_ms`; returns rows removed
    pub fn delete_snapshots_before(&self, cutoff_ms: i64) -> AppResult<usize> {
        let conn = self.connection()?;
        let deleted = conn.execute(
            "DELETE FROM progress_snapshots WHERE saved_at < ?1",
            params![cutoff_ms],
        )?;
        Ok(deleted)
    }

    /// Check if the database is healthy
    pub fn is_healthy(&self) -> bool {
        match self.pool.get() {
            Ok(conn) => conn
                .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .is_ok(),
            Err(_) => false,
        }
    }
}
