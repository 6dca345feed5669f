//! flatdb - checksummed single-object flat files
//!
//! Persists one in-memory object to disk as a self-describing,
//! integrity-checked blob and reloads it with corruption and format
//! mismatch detection.

pub mod cache;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod ui;

pub use db::{FlatDb, FlatFile, FlatPayload, ReadStatus, Verdict};
pub use error::{FlatDbError, FlatDbResult};
