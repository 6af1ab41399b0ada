//! Test store that fails selected writes.

use async_trait::async_trait;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, MemoryStore};

/// Delegates to a [`MemoryStore`], except `set` fails when `fail_set` is on
/// and `append` fails for keys ending in `fail_append_suffix`.
#[derive(Debug, Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub fail_set: bool,
    pub fail_append_suffix: Option<&'static str>,
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        if self.fail_set {
            return Err(CacheError::Internal(format!("set refused for {}", key)));
        }
        self.inner.set(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.inner.incr(key).await
    }

    async fn append(&self, key: &str, value: Vec<u8>) -> Result<usize> {
        if let Some(suffix) = self.fail_append_suffix {
            if key.ends_with(suffix) {
                return Err(CacheError::Internal(format!("append refused for {}", key)));
            }
        }
        self.inner.append(key, value).await
    }

    async fn sequence(&self, key: &str) -> Result<Vec<Vec<u8>>> {
        self.inner.sequence(key).await
    }

    async fn set_with_expiry(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<()> {
        self.inner.set_with_expiry(key, value, ttl_seconds).await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.inner.exists(key).await
    }

    async fn flush_all(&self) -> Result<()> {
        self.inner.flush_all().await
    }
}
