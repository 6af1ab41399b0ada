//! Backing Store Module
//!
//! Defines the key-value contract the cache is built on and an in-memory
//! implementation with TTL expiration.

mod entry;
mod memory;
mod stats;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{StoreEntry, Value};
pub use memory::MemoryStore;
pub use stats::StoreStats;

// == Key Value Store ==
/// Primitives the cache needs from a backing store.
///
/// Implementations must make `incr` and `append` atomic with respect to
/// concurrent callers; the cache wrappers do no locking of their own.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stores bytes under `key`, replacing any value and clearing its TTL.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Returns the bytes under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the integer under `key` (missing counts as 0) and returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends to the sequence under `key` and returns its new length.
    async fn append(&self, key: &str, value: Vec<u8>) -> Result<usize>;

    /// Returns the whole sequence under `key`; empty if absent.
    async fn sequence(&self, key: &str) -> Result<Vec<Vec<u8>>>;

    /// Stores bytes under `key` that expire after `ttl_seconds`.
    async fn set_with_expiry(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<()>;

    /// Returns true if `key` holds a live value.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Removes every key.
    async fn flush_all(&self) -> Result<()>;
}
