//! Domain types

mod reading;

pub use reading::{NewReading, Reading, REQUIRED_FIELDS};
