//! TTL Page Cache
//!
//! Serves a fetched page from the store until its TTL elapses and counts
//! every request made for each URL.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::decode_utf8;
use crate::error::Result;
use crate::ops::Operation;
use crate::store::KeyValueStore;

/// Key holding the cached content for `url`.
pub fn cache_key(url: &str) -> String {
    format!("cache:{}", url)
}

/// Key holding the request counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

// == TTL Cache ==
/// Caches the result of a `String -> String` fetch per URL.
///
/// `count:<url>` is incremented exactly once per call, whether the page came
/// from the store or from the wrapped fetch, so it is a total request count.
/// A fetch failure is returned as is and counts nothing.
pub struct TtlCache<O, S> {
    inner: O,
    store: Arc<S>,
    ttl_seconds: u64,
}

impl<O, S: KeyValueStore> TtlCache<O, S> {
    pub fn new(inner: O, store: Arc<S>, ttl_seconds: u64) -> Self {
        Self {
            inner,
            store,
            ttl_seconds,
        }
    }

    /// Returns how many times `url` has been requested through this cache.
    pub async fn request_count(&self, url: &str) -> Result<i64> {
        match self.store.get(&count_key(url)).await? {
            Some(raw) => crate::cache::decode_integer(&raw),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl<O, S> Operation<String> for TtlCache<O, S>
where
    O: Operation<String, Output = String>,
    S: KeyValueStore,
{
    type Output = String;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, url: String) -> Result<String> {
        let cache_key = cache_key(&url);
        let count_key = count_key(&url);

        // An expired entry reads as absent.
        if let Some(cached) = self.store.get(&cache_key).await? {
            let requests = self.store.incr(&count_key).await?;
            debug!(url = %url, requests, "page cache hit");
            return decode_utf8(&cached);
        }

        let content = self.inner.call(url.clone()).await?;
        self.store
            .set_with_expiry(&cache_key, content.clone().into_bytes(), self.ttl_seconds)
            .await?;
        let requests = self.store.incr(&count_key).await?;
        debug!(url = %url, requests, ttl = self.ttl_seconds, "page fetched and cached");

        Ok(content)
    }
}
