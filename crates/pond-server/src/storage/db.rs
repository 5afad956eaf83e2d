//! SQLite reading store (embedded, no external dependencies)

use super::schema;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use pond_core::{NewReading, PondError, Reading, ReadingStore};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

/// Connection settings for the reading store.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
    pub max_connections: u32,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            max_connections: 5,
        }
    }
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and ensures the readings
    /// table exists. Safe to call against an existing file on every startup.
    pub async fn open(database_path: &Path, options: &StorageOptions) -> Result<Self> {
        info!("Opening SQLite database at: {}", database_path.display());

        if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(options.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to SQLite database at: {}",
                    database_path.display()
                )
            })?;

        Self::ensure_schema(&pool)
            .await
            .context("Failed to create readings table")?;

        info!("Database initialization complete");
        Ok(Self { pool })
    }

    async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
        let sql = schema::create_table_sql();
        sqlx::query(&sql).execute(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ReadingStore for SqliteStore {
    async fn insert(&self, reading: &NewReading) -> pond_core::Result<i64> {
        let sql = schema::insert_sql();
        let result = sqlx::query(&sql)
            .bind(Reading::now())
            .bind(reading.ph)
            .bind(reading.ec)
            .bind(reading.do_)
            .bind(reading.temp)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("insert reading", e))?;

        let id = result.last_insert_rowid();
        debug!("Inserted reading {}", id);
        Ok(id)
    }

    async fn list_all(&self) -> pond_core::Result<Vec<Reading>> {
        let sql = schema::select_all_sql();
        let rows: Vec<ReadingRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list readings", e))?;

        Ok(rows.into_iter().map(Reading::from).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database connections closed");
    }
}

fn storage_error(operation: &str, e: sqlx::Error) -> PondError {
    error!("Failed to {}: {}", operation, e);
    PondError::Storage(e.to_string())
}

/// Measurements are nullable because files created by earlier versions of
/// the logger have no NOT NULL constraint on them.
#[derive(sqlx::FromRow)]
struct ReadingRow {
    id: i64,
    timestamp: NaiveDateTime,
    ph: Option<f64>,
    ec: Option<f64>,
    #[sqlx(rename = "do")]
    do_: Option<f64>,
    temp: Option<f64>,
}

// A NULL measurement becomes NaN, which serializes as JSON `null`.
fn measurement(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

impl From<ReadingRow> for Reading {
    fn from(r: ReadingRow) -> Self {
        Reading {
            id: r.id,
            timestamp: r.timestamp,
            ph: measurement(r.ph),
            ec: measurement(r.ec),
            do_: measurement(r.do_),
            temp: measurement(r.temp),
        }
    }
}
