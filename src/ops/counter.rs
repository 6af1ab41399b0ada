//! Call Counter
//!
//! Increments a per-operation counter before every call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::ops::Operation;
use crate::store::KeyValueStore;

/// Counts calls to the wrapped operation under the key `<name>`.
pub struct CallCounter<O, S> {
    inner: O,
    store: Arc<S>,
}

impl<O, S: KeyValueStore> CallCounter<O, S> {
    pub fn new(inner: O, store: Arc<S>) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl<In, O, S> Operation<In> for CallCounter<O, S>
where
    In: Send + 'static,
    O: Operation<In>,
    S: KeyValueStore,
{
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: In) -> Result<O::Output> {
        // Counted even if the call then fails.
        let count = self.store.incr(self.inner.name()).await?;
        debug!(operation = self.inner.name(), count, "call counted");
        self.inner.call(input).await
    }
}
