//! Replay
//!
//! Reads back the call count and history of an instrumented operation.

use std::fmt;

use serde_json::Value as Json;
use tracing::info;

use crate::cache::decode_integer;
use crate::error::Result;
use crate::ops::{inputs_key, outputs_key, Operation};
use crate::store::KeyValueStore;

/// One recorded invocation, rendered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayedCall {
    /// Arguments, comma separated
    pub args: String,
    /// Result, or `None` if the call recorded no output
    pub output: Option<String>,
}

/// The recorded history of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CallReplay {
    pub name: String,
    /// Stored call count
    pub count: i64,
    /// Recorded calls, inputs paired with outputs by position
    pub calls: Vec<ReplayedCall>,
}

impl CallReplay {
    /// Renders each call as `name(args) -> output`.
    pub fn lines(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|call| match &call.output {
                Some(output) => format!("{}({}) -> {}", self.name, call.args, output),
                None => format!("{}({}) -> <no output>", self.name, call.args),
            })
            .collect()
    }
}

impl fmt::Display for CallReplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} was called {} time{}:", self.name, self.count, plural)?;
        for line in self.lines() {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Replays the history of `op`. See [`replay_named`].
pub async fn replay<S, In, O>(store: &S, op: &O) -> Result<Option<CallReplay>>
where
    S: KeyValueStore + ?Sized,
    In: Send + 'static,
    O: Operation<In>,
{
    replay_named(store, op.name()).await
}

/// Replays the history recorded under `name`.
///
/// Returns `Ok(None)` when no call count was ever recorded. Each replayed
/// line is also logged at info level.
pub async fn replay_named<S>(store: &S, name: &str) -> Result<Option<CallReplay>>
where
    S: KeyValueStore + ?Sized,
{
    let count = match store.get(name).await? {
        Some(raw) => decode_integer(&raw)?,
        None => return Ok(None),
    };

    let inputs = store.sequence(&inputs_key(name)).await?;
    let mut outputs = store.sequence(&outputs_key(name)).await?.into_iter();

    let calls = inputs
        .iter()
        .map(|input| ReplayedCall {
            args: render_args(input),
            output: outputs.next().map(|o| render_value(&o)),
        })
        .collect();

    let replay = CallReplay {
        name: name.to_string(),
        count,
        calls,
    };

    info!(operation = name, count, "replaying call history");
    for line in replay.lines() {
        info!("{}", line);
    }
    Ok(Some(replay))
}

/// Renders a serialized argument tuple without its surrounding brackets.
fn render_args(raw: &[u8]) -> String {
    match serde_json::from_slice::<Json>(raw) {
        Ok(Json::Array(items)) => items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        Ok(other) => other.to_string(),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}

fn render_value(raw: &[u8]) -> String {
    match serde_json::from_slice::<Json>(raw) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}
