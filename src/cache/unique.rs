//! Instrumented Cache
//!
//! Stores values under fresh random keys and reads them back with a decoder
//! chosen by the caller. `store` itself is count and history tracked.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::cache::{decode_float, decode_integer, decode_utf8, CacheKey, StoredValue};
use crate::config::Config;
use crate::error::Result;
use crate::ops::{replay, CallCounter, CallHistory, CallReplay, Operation, OperationExt};
use crate::store::KeyValueStore;

/// Name under which `store` calls are counted and recorded.
pub const STORE_OPERATION: &str = "InstrumentedCache.store";

/// The bare write behind `store`: one `set` under a fresh key.
struct UniqueWrite<S> {
    store: Arc<S>,
}

#[async_trait]
impl<S: KeyValueStore> Operation<StoredValue> for UniqueWrite<S> {
    type Output = CacheKey;

    fn name(&self) -> &str {
        STORE_OPERATION
    }

    async fn call(&self, value: StoredValue) -> Result<CacheKey> {
        let key = CacheKey::generate();
        self.store.set(key.as_str(), value.to_bytes()).await?;
        debug!(key = %key, "value stored");
        Ok(key)
    }
}

// == Instrumented Cache ==
/// Unique-key cache over a shared backing store.
pub struct InstrumentedCache<S> {
    store: Arc<S>,
    writer: CallCounter<CallHistory<UniqueWrite<S>, S>, S>,
}

impl<S: KeyValueStore> InstrumentedCache<S> {
    // == Constructor ==
    /// Creates a cache over `store`, flushing it first if the config asks to.
    pub async fn new(store: Arc<S>, config: &Config) -> Result<Self> {
        if config.flush_on_init {
            store.flush_all().await?;
            info!("Backing store flushed");
        }

        let writer = UniqueWrite {
            store: store.clone(),
        }
        .with_history(store.clone())
        .record_failures(config.record_failed_calls)
        .with_call_count(store.clone());

        Ok(Self { store, writer })
    }

    // == Store ==
    /// Writes `value` under a new unique key and returns the key.
    ///
    /// Equal values stored twice get two distinct keys.
    pub async fn store(&self, value: impl Into<StoredValue>) -> Result<CacheKey> {
        self.writer.call(value.into()).await
    }

    // == Retrieve ==
    /// Returns the raw bytes under `key`, or `None` if absent.
    pub async fn retrieve(&self, key: impl AsRef<str>) -> Result<Option<Vec<u8>>> {
        self.store.get(key.as_ref()).await
    }

    /// Returns the value under `key` decoded by `decode`, or `None` if absent.
    ///
    /// Decoder errors are returned as is.
    pub async fn retrieve_with<T, F>(&self, key: impl AsRef<str>, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(&[u8]) -> Result<T>,
    {
        match self.retrieve(key).await? {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    pub async fn retrieve_as_string(&self, key: impl AsRef<str>) -> Result<Option<String>> {
        self.retrieve_with(key, decode_utf8).await
    }

    pub async fn retrieve_as_integer(&self, key: impl AsRef<str>) -> Result<Option<i64>> {
        self.retrieve_with(key, decode_integer).await
    }

    pub async fn retrieve_as_float(&self, key: impl AsRef<str>) -> Result<Option<f64>> {
        self.retrieve_with(key, decode_float).await
    }

    // == Replay ==
    /// Replays the recorded `store` calls; `None` if `store` was never called.
    pub async fn replay_store(&self) -> Result<Option<CallReplay>> {
        replay(self.store.as_ref(), &self.writer).await
    }
}
