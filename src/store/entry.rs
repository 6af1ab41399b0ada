//! Store Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Value ==
/// What a key holds: a single byte string or an append-only sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bytes(Vec<u8>),
    Sequence(Vec<Vec<u8>>),
}

// == Store Entry ==
/// Represents a single store entry with value and metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored value
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// TTLs too large to represent saturate to the far future.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(value: Value, ttl_seconds: Option<u64>) -> Self {
        let expires_at =
            ttl_seconds.map(|ttl| ttl.saturating_mul(1000).saturating_add(current_timestamp_ms()));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn bytes(s: &str) -> Value {
        Value::Bytes(s.as_bytes().to_vec())
    }

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = StoreEntry::new(bytes("test_value"), None);

        assert_eq!(entry.value, bytes("test_value"));
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = StoreEntry::new(bytes("test_value"), Some(1));

        assert!(!entry.is_expired());

        // Wait for expiration
        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expires_at_is_ttl_from_now() {
        let before = current_timestamp_ms();
        let entry = StoreEntry::new(Value::Sequence(Vec::new()), Some(10));
        let after = current_timestamp_ms();

        let expires_at = entry.expires_at.unwrap();
        assert!(expires_at >= before + 10_000);
        assert!(expires_at <= after + 10_000);
    }

    #[test]
    fn test_huge_ttl_saturates_instead_of_overflowing() {
        let entry = StoreEntry::new(bytes("v"), Some(u64::MAX));
        assert_eq!(entry.expires_at, Some(u64::MAX));
        assert!(!entry.is_expired());

        let entry = StoreEntry::new(bytes("v"), Some(u64::MAX / 500));
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = StoreEntry {
            value: bytes("test"),
            expires_at: Some(current_timestamp_ms()),
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
