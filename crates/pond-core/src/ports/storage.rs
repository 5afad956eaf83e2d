//! Storage trait for reading persistence

use crate::types::{NewReading, Reading};
use crate::Result;
use async_trait::async_trait;

/// Append-only reading store.
///
/// Implementations own the on-disk representation. Each call performs a
/// single read or write and fails with [`crate::PondError::Storage`] when the
/// backend is unavailable. No retries are attempted.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Persists a reading stamped with the current UTC time and returns its id.
    async fn insert(&self, reading: &NewReading) -> Result<i64>;

    /// Returns every stored reading in ascending id order.
    async fn list_all(&self) -> Result<Vec<Reading>>;

    /// Releases backend resources. Called once on shutdown.
    async fn close(&self);
}
