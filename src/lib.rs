//! Instrumented Cache - call-tracked caching over a key-value store
//!
//! Stores values under unique keys, records call counts and argument/result
//! history of wrapped operations, and caches fetched pages with a TTL.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ops;
pub mod store;
pub mod tasks;

pub use cache::{CacheKey, InstrumentedCache, StoredValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use fetch::HttpFetcher;
pub use ops::{operation, replay, replay_named, CallReplay, Operation, OperationExt};
pub use store::{KeyValueStore, MemoryStore};
pub use tasks::spawn_sweeper;
