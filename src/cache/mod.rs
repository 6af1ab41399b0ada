//! Cache Module
//!
//! Unique-key storage with caller-chosen decoding over a backing store.

mod unique;
mod value;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use unique::{InstrumentedCache, STORE_OPERATION};
pub use value::{decode_float, decode_integer, decode_utf8, CacheKey, StoredValue};
