// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::work::{Work, WorkValue};

/// What an operation produced, and how the chain should proceed.
///
/// `Continue` hands the value to the item's `next` (and to its declared
/// tasks). `Fork` does the same but also fans out extra tasks chosen at
/// runtime. `Eject` ends the chain here: the value becomes the final result
/// and every declared `next` and task is dropped.
#[derive(Debug, Clone)]
pub enum Outcome {
    Continue(WorkValue),
    Fork { value: WorkValue, tasks: Vec<Work> },
    Eject(WorkValue),
}

impl Outcome {
    /// An empty continuation, what a step that returns nothing produces.
    pub fn empty() -> Self {
        Self::Continue(WorkValue::new())
    }

    /// Build a continuation from `(key, value)` pairs.
    pub fn with<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Continue(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn value(&self) -> &WorkValue {
        match self {
            Self::Continue(value) | Self::Eject(value) => value,
            Self::Fork { value, .. } => value,
        }
    }

    pub fn is_eject(&self) -> bool {
        matches!(self, Self::Eject(_))
    }

    /// Split into the value and any runtime tasks.
    pub(crate) fn into_parts(self) -> (WorkValue, Vec<Work>) {
        match self {
            Self::Continue(value) | Self::Eject(value) => (value, Vec::new()),
            Self::Fork { value, tasks } => (value, tasks),
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<WorkValue> for Outcome {
    fn from(value: WorkValue) -> Self {
        Self::Continue(value)
    }
}

/// A bare JSON object continues the chain; any other JSON value is
/// stored under a `value` key.
impl From<serde_json::Value> for Outcome {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::Continue(map),
            serde_json::Value::Null => Self::empty(),
            other => {
                let mut map = WorkValue::new();
                map.insert("value".to_string(), other);
                Self::Continue(map)
            }
        }
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}
