//! Storage layer
//!
//! Readings live in a single SQLite file (embedded, no server process).

pub mod db;
pub mod schema;

pub use db::{SqliteStore, StorageOptions};
