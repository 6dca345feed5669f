//! Reference payload stored through the flat database
//!
//! `ExpiringCache` maps keys to values with an expiry time. It is loaded at
//! startup, pruned of expired entries, and dumped back on save.

pub mod expiring;

pub use expiring::{CacheEntry, ExpiringCache};
