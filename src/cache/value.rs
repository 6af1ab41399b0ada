//! Stored Values and Keys
//!
//! Conversions between typed values and the opaque bytes kept in the store.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CacheError, Result};

// == Stored Value ==
/// A value accepted by [`InstrumentedCache::store`](crate::InstrumentedCache::store).
///
/// Numbers are written as their decimal text; the type is not stored, so the
/// reader picks a decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl StoredValue {
    /// Returns the byte representation written to the store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(s) => s.as_bytes().to_vec(),
            StoredValue::Bytes(b) => b.clone(),
            StoredValue::Integer(i) => i.to_string().into_bytes(),
            StoredValue::Float(f) => f.to_string().into_bytes(),
        }
    }
}

// Call history form: text, integers and floats as plain JSON scalars, bytes
// as `{"bytes": [..]}` so they never read like an argument tuple.
impl Serialize for StoredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StoredValue::Text(s) => serializer.serialize_str(s),
            StoredValue::Integer(i) => serializer.serialize_i64(*i),
            StoredValue::Float(f) => serializer.serialize_f64(*f),
            StoredValue::Bytes(b) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("bytes", b)?;
                map.end()
            }
        }
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(value.into())
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

// == Cache Key ==
/// Random key handed out by `store`. Never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Generates a fresh UUIDv4 key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Decoders ==
/// Decodes UTF-8 text.
pub fn decode_utf8(raw: &[u8]) -> Result<String> {
    String::from_utf8(raw.to_vec()).map_err(|e| CacheError::Decode(e.to_string()))
}

/// Decodes a decimal integer, ignoring surrounding whitespace.
pub fn decode_integer(raw: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(raw).map_err(|e| CacheError::Decode(e.to_string()))?;
    text.trim()
        .parse()
        .map_err(|_| CacheError::Decode(format!("not an integer: {:?}", text)))
}

/// Decodes a decimal float, ignoring surrounding whitespace.
pub fn decode_float(raw: &[u8]) -> Result<f64> {
    let text = std::str::from_utf8(raw).map_err(|e| CacheError::Decode(e.to_string()))?;
    text.trim()
        .parse()
        .map_err(|_| CacheError::Decode(format!("not a float: {:?}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes() {
        assert_eq!(StoredValue::from("hello").to_bytes(), b"hello".to_vec());
        assert_eq!(StoredValue::from(42).to_bytes(), b"42".to_vec());
        assert_eq!(StoredValue::from(-7i64).to_bytes(), b"-7".to_vec());
        assert_eq!(StoredValue::from(2.5).to_bytes(), b"2.5".to_vec());
        assert_eq!(StoredValue::from(&b"\x00\xff"[..]).to_bytes(), vec![0, 255]);
    }

    #[test]
    fn test_history_form() {
        let json = |v: StoredValue| serde_json::to_string(&v).unwrap();

        assert_eq!(json("hi".into()), r#""hi""#);
        assert_eq!(json(42.into()), "42");
        assert_eq!(json(2.5.into()), "2.5");
        assert_eq!(json(vec![0u8, 1, 255].into()), r#"{"bytes":[0,1,255]}"#);
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let a = CacheKey::generate();
        let b = CacheKey::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_decode_integer() {
        assert_eq!(decode_integer(b"42").unwrap(), 42);
        assert_eq!(decode_integer(b" 7\n").unwrap(), 7);
        assert!(matches!(decode_integer(b"forty"), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_decode_utf8_rejects_invalid() {
        assert_eq!(decode_utf8(b"hello").unwrap(), "hello");
        assert!(matches!(decode_utf8(&[0xff, 0xfe]), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_decode_float() {
        assert_eq!(decode_float(b"2.5").unwrap(), 2.5);
        assert_eq!(decode_float(b"3").unwrap(), 3.0);
        assert!(decode_float(b"abc").is_err());
    }
}
