//! Key/value cache whose entries expire
//!
//! Expired entries are dropped by `maintain`, which the flat database runs
//! right after a successful load.

use crate::db::{write_compact_size, write_string, ByteReader, CodecError, FlatPayload};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A cached value and its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    pub value: String,
    /// Whole seconds; that is all the file format keeps
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Entry expiring `ttl` from now, or `None` when that instant is out of range
    pub fn new(value: impl Into<String>, ttl: Duration) -> Option<Self> {
        let expires_at = Utc::now().checked_add_signed(ttl)?;
        Some(Self::expiring_at(value, expires_at))
    }

    pub fn expiring_at(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at: expires_at.trunc_subsecs(0),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Expiring key/value cache persisted as a flat file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpiringCache {
    entries: BTreeMap<String, CacheEntry>,
}

impl ExpiringCache {
    /// File name under the data directory
    pub const FILENAME: &'static str = "flatcache.dat";

    /// Type tag written into the file header
    pub const TYPE_TAG: &'static str = "ExpiringCache";

    pub fn insert(&mut self, key: impl Into<String>, entry: CacheEntry) -> Option<CacheEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CacheEntry)> {
        self.entries.iter()
    }

    pub fn expired_count(&self, now: DateTime<Utc>) -> usize {
        self.entries
            .values()
            .filter(|e| e.is_expired_at(now))
            .count()
    }

    /// Drop entries expired at `now`, returning how many were removed
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired_at(now));
        before - self.entries.len()
    }
}

impl FlatPayload for ExpiringCache {
    fn serialize_into(&self, buf: &mut Vec<u8>) -> Result<(), CodecError> {
        write_compact_size(buf, self.entries.len() as u64);
        for (key, entry) in &self.entries {
            write_string(buf, key)?;
            write_string(buf, &entry.value)?;
            buf.extend_from_slice(&entry.expires_at.timestamp().to_le_bytes());
        }
        Ok(())
    }

    fn deserialize_from(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let mut reader = ByteReader::new(bytes);
        let count = reader.read_compact_size()?;

        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let key = reader.read_string()?;
            let value = reader.read_string()?;
            let secs = reader.read_i64()?;
            let expires_at = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| CodecError::Custom(format!("expiry out of range: {}", secs)))?;

            if entries
                .insert(key.clone(), CacheEntry { value, expires_at })
                .is_some()
            {
                return Err(CodecError::Custom(format!("duplicate key: {}", key)));
            }
        }
        reader.finish()?;

        self.entries = entries;
        Ok(())
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn describe(&self) -> String {
        format!(
            "Entries: {}, expired: {}",
            self.entries.len(),
            self.expired_count(Utc::now())
        )
    }

    fn filename(&self) -> &str {
        Self::FILENAME
    }

    fn maintain(&mut self) {
        self.prune_expired(Utc::now());
    }
}
