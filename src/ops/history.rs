//! Call History
//!
//! Records serialized arguments and results of an operation as two
//! append-only sequences in the backing store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::Result;
use crate::ops::Operation;
use crate::store::KeyValueStore;

/// Key of the sequence holding an operation's serialized arguments.
pub fn inputs_key(name: &str) -> String {
    format!("{}:inputs", name)
}

/// Key of the sequence holding an operation's serialized results.
pub fn outputs_key(name: &str) -> String {
    format!("{}:outputs", name)
}

// == Call History ==
/// Appends each call's arguments to `<name>:inputs` before the call and its
/// result to `<name>:outputs` after it.
///
/// A failed call leaves no output behind unless failure recording is on, in
/// which case an `{"error": ...}` marker keeps both sequences the same length.
/// Failing to record an output is logged and does not change the call's result.
pub struct CallHistory<O, S> {
    inner: O,
    store: Arc<S>,
    record_failures: bool,
}

impl<O, S: KeyValueStore> CallHistory<O, S> {
    pub fn new(inner: O, store: Arc<S>) -> Self {
        Self {
            inner,
            store,
            record_failures: false,
        }
    }

    /// Appends a failure marker to the outputs when the wrapped call fails.
    pub fn record_failures(mut self, enabled: bool) -> Self {
        self.record_failures = enabled;
        self
    }
}

#[async_trait]
impl<In, O, S> Operation<In> for CallHistory<O, S>
where
    In: Serialize + Send + 'static,
    O: Operation<In>,
    O::Output: Serialize,
    S: KeyValueStore,
{
    type Output = O::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn call(&self, input: In) -> Result<O::Output> {
        let name = self.inner.name();

        let encoded = serde_json::to_vec(&input)?;
        let calls = self.store.append(&inputs_key(name), encoded).await?;
        debug!(operation = name, calls, "input recorded");

        // Once the wrapped call has run, its outcome is returned even if the
        // output cannot be recorded.
        match self.inner.call(input).await {
            Ok(output) => {
                let encoded = serde_json::to_vec(&output);
                if let Err(err) = self.record_output(name, encoded).await {
                    warn!(operation = name, error = %err, "output not recorded");
                }
                Ok(output)
            }
            Err(err) => {
                if self.record_failures {
                    let marker = serde_json::to_vec(&json!({ "error": err.to_string() }));
                    if let Err(record_err) = self.record_output(name, marker).await {
                        warn!(operation = name, error = %record_err, "failure marker not recorded");
                    }
                }
                Err(err)
            }
        }
    }
}

impl<O, S: KeyValueStore> CallHistory<O, S> {
    async fn record_output(
        &self,
        name: &str,
        encoded: serde_json::Result<Vec<u8>>,
    ) -> Result<()> {
        self.store.append(&outputs_key(name), encoded?).await?;
        Ok(())
    }
}
