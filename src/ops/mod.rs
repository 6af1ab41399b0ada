//! Operations Module
//!
//! A named, async, fallible operation and the combinators that instrument it
//! against a backing store: call counting, argument/result history and TTL
//! caching of fetched pages.

mod counter;
mod history;
mod replay;
mod ttl;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::store::KeyValueStore;

// Re-export public types
pub use counter::CallCounter;
pub use history::{inputs_key, outputs_key, CallHistory};
pub use replay::{replay, replay_named, CallReplay, ReplayedCall};
pub use ttl::{cache_key, count_key, TtlCache};

// == Operation ==
/// A data-producing operation identified by a caller-supplied name.
///
/// The name namespaces every key an instrumenting wrapper writes, so two
/// operations sharing a store must use distinct names.
#[async_trait]
pub trait Operation<In: Send + 'static>: Send + Sync {
    type Output: Send;

    fn name(&self) -> &str;

    async fn call(&self, input: In) -> Result<Self::Output>;
}

// == Fn Operation ==
/// Adapts an async closure into an [`Operation`].
pub struct FnOperation<F> {
    name: String,
    f: F,
}

/// Builds an [`Operation`] named `name` from an async closure.
///
/// ```ignore
/// let add = operation("add", |(a, b): (i64, i64)| async move { Ok(a + b) });
/// ```
pub fn operation<F>(name: impl Into<String>, f: F) -> FnOperation<F> {
    FnOperation {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<In, Out, F, Fut> Operation<In> for FnOperation<F>
where
    In: Send + 'static,
    Out: Send,
    F: Fn(In) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Out>> + Send,
{
    type Output = Out;

    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, input: In) -> Result<Out> {
        (self.f)(input).await
    }
}

// == Operation Ext ==
/// Wrapping combinators available on every [`Operation`].
pub trait OperationExt<In: Send + 'static>: Operation<In> + Sized {
    /// Counts every call under the operation's name.
    fn with_call_count<S: KeyValueStore>(self, store: Arc<S>) -> CallCounter<Self, S> {
        CallCounter::new(self, store)
    }

    /// Records arguments and results under `<name>:inputs` / `<name>:outputs`.
    fn with_history<S: KeyValueStore>(self, store: Arc<S>) -> CallHistory<Self, S> {
        CallHistory::new(self, store)
    }

    /// Serves fresh results from the store for `ttl_seconds` after each fetch.
    fn with_ttl_cache<S: KeyValueStore>(self, store: Arc<S>, ttl_seconds: u64) -> TtlCache<Self, S> {
        TtlCache::new(self, store, ttl_seconds)
    }
}

impl<In: Send + 'static, O: Operation<In>> OperationExt<In> for O {}
