//! Property-Based Tests for the Instrumented Cache
//!
//! Uses proptest to check round-trips and call instrumentation.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::{InstrumentedCache, StoredValue};
use crate::config::Config;
use crate::ops::{inputs_key, operation, outputs_key, Operation, OperationExt};
use crate::store::{KeyValueStore, MemoryStore};

fn run<T>(fut: impl std::future::Future<Output = T>) -> T {
    tokio_test::block_on(fut)
}

async fn new_cache() -> InstrumentedCache<MemoryStore> {
    InstrumentedCache::new(Arc::new(MemoryStore::new()), &Config::default())
        .await
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Text survives store then retrieve_as_string.
    #[test]
    fn prop_roundtrip_text(value in ".{0,128}") {
        let back = run(async {
            let cache = new_cache().await;
            let key = cache.store(value.clone()).await.unwrap();
            cache.retrieve_as_string(&key).await.unwrap()
        });
        prop_assert_eq!(back, Some(value));
    }

    // Bytes survive store then retrieve.
    #[test]
    fn prop_roundtrip_bytes(value in prop::collection::vec(any::<u8>(), 0..128)) {
        let back = run(async {
            let cache = new_cache().await;
            let key = cache.store(value.clone()).await.unwrap();
            cache.retrieve(&key).await.unwrap()
        });
        prop_assert_eq!(back, Some(value));
    }

    // Integers survive store then retrieve_as_integer.
    #[test]
    fn prop_roundtrip_integer(value in any::<i64>()) {
        let back = run(async {
            let cache = new_cache().await;
            let key = cache.store(value).await.unwrap();
            cache.retrieve_as_integer(&key).await.unwrap()
        });
        prop_assert_eq!(back, Some(value));
    }

    // Finite floats survive store then retrieve_as_float.
    #[test]
    fn prop_roundtrip_float(value in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let back = run(async {
            let cache = new_cache().await;
            let key = cache.store(StoredValue::Float(value)).await.unwrap();
            cache.retrieve_as_float(&key).await.unwrap()
        });
        prop_assert_eq!(back, Some(value));
    }

    // Every store hands out a new key, even for equal values.
    #[test]
    fn prop_keys_unique(n in 1usize..32) {
        let keys = run(async {
            let cache = new_cache().await;
            let mut keys = HashSet::new();
            for _ in 0..n {
                keys.insert(cache.store("same").await.unwrap());
            }
            keys
        });
        prop_assert_eq!(keys.len(), n);
    }

    // After N tracked calls the count is N and both sequences hold N
    // entries in call order.
    #[test]
    fn prop_history_lockstep(args in prop::collection::vec(any::<i32>(), 1..20)) {
        let (count, inputs, outputs) = run(async {
            let store = Arc::new(MemoryStore::new());
            let negate = operation("negate", |x: i32| async move { Ok(-(x as i64)) })
                .with_history(store.clone())
                .with_call_count(store.clone());

            for x in &args {
                negate.call(*x).await.unwrap();
            }

            let count = store.get("negate").await.unwrap();
            let inputs = store.sequence(&inputs_key("negate")).await.unwrap();
            let outputs = store.sequence(&outputs_key("negate")).await.unwrap();
            (count, inputs, outputs)
        });

        prop_assert_eq!(count, Some(args.len().to_string().into_bytes()));
        prop_assert_eq!(inputs.len(), args.len());
        prop_assert_eq!(outputs.len(), args.len());
        for ((x, input), output) in args.iter().zip(&inputs).zip(&outputs) {
            let input: i32 = serde_json::from_slice(input).unwrap();
            let output: i64 = serde_json::from_slice(output).unwrap();
            prop_assert_eq!(input, *x);
            prop_assert_eq!(output, -(*x as i64));
        }
    }
}
