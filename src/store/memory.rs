//! In-Memory Store Module
//!
//! Redis-like key-value store kept in a HashMap, with lazy TTL expiration.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, StoreEntry, StoreStats, Value};

// == Memory Store ==
/// In-memory backing store.
///
/// Every operation takes the write lock, so `incr` and `append` are atomic
/// for concurrent callers sharing the store through an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, StoreEntry>,
    stats: StoreStats,
}

impl Inner {
    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn live(&mut self, key: &str) -> Option<&mut StoreEntry> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            return None;
        }
        self.entries.get_mut(key)
    }

    fn insert(&mut self, key: &str, entry: StoreEntry) {
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());
    }
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - inner.entries.len();

        inner.stats.record_expirations(removed);
        inner.stats.set_total_entries(inner.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current store statistics.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }
}

/// Parses the textual integer a counter is stored as.
fn parse_counter(key: &str, bytes: &[u8]) -> Result<i64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| CacheError::NotAnInteger(key.to_string()))
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.insert(key, StoreEntry::new(Value::Bytes(value), None));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        let found = match inner.live(key) {
            Some(entry) => match &entry.value {
                Value::Bytes(bytes) => Some(bytes.clone()),
                Value::Sequence(_) => return Err(CacheError::WrongType(key.to_string())),
            },
            None => None,
        };

        if found.is_some() {
            inner.stats.record_hit();
        } else {
            inner.stats.record_miss();
        }
        Ok(found)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        let next = match inner.live(key) {
            Some(entry) => {
                let current = match &entry.value {
                    Value::Bytes(bytes) => parse_counter(key, bytes)?,
                    Value::Sequence(_) => return Err(CacheError::WrongType(key.to_string())),
                };
                let next = current
                    .checked_add(1)
                    .ok_or_else(|| CacheError::NotAnInteger(key.to_string()))?;
                // The TTL, if any, is kept.
                entry.value = Value::Bytes(next.to_string().into_bytes());
                next
            }
            None => {
                inner.insert(key, StoreEntry::new(Value::Bytes(b"1".to_vec()), None));
                1
            }
        };

        debug!(key, value = next, "incremented");
        Ok(next)
    }

    async fn append(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        match inner.live(key) {
            Some(entry) => match &mut entry.value {
                Value::Sequence(items) => {
                    items.push(value);
                    Ok(items.len())
                }
                Value::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => {
                inner.insert(key, StoreEntry::new(Value::Sequence(vec![value]), None));
                Ok(1)
            }
        }
    }

    async fn sequence(&self, key: &str) -> Result<Vec<Vec<u8>>> {
        let mut guard = self.inner.write().await;

        match guard.live(key) {
            Some(entry) => match &entry.value {
                Value::Sequence(items) => Ok(items.clone()),
                Value::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => Ok(Vec::new()),
        }
    }

    async fn set_with_expiry(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.insert(key, StoreEntry::new(Value::Bytes(value), Some(ttl_seconds)));
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.live(key).is_some())
    }

    async fn flush_all(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.stats.set_total_entries(0);
        debug!(removed, "store flushed");
        Ok(())
    }
}
