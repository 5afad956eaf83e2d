//! Pond Logger Core Library
//!
//! Domain types, payload mapping and the storage port for the pond
//! water-quality logger.

pub mod error;
pub mod ports;
pub mod types;

pub use error::{PondError, Result};
pub use ports::ReadingStore;
pub use types::{NewReading, Reading, REQUIRED_FIELDS};
