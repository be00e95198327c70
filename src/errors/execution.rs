// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced to the caller of `submit`, and the failure report handed
//! to error handlers.

use serde::Serialize;
use thiserror::Error;

use crate::errors::WorkError;
use crate::work::WorkValue;

/// Error returned from a submission.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// An empty sequence was submitted; there is no head item to run.
    #[error("cannot submit an empty work sequence")]
    EmptySubmission,

    /// A work item failed terminally and declared no error handler.
    ///
    /// Only raised when the executor was built with `error_with_value`;
    /// otherwise the failure is logged and the submission resolves to `None`.
    #[error("work '{work}' (id {id}) failed after {attempts} attempt(s): {source}")]
    Unrouted {
        work: String,
        id: String,
        attempts: u32,
        #[source]
        source: WorkError,
        /// The value the failed item was invoked with.
        value: WorkValue,
    },
}

impl ExecutionError {
    /// The in-flight value attached to an unrouted failure.
    pub fn value(&self) -> Option<&WorkValue> {
        match self {
            Self::Unrouted { value, .. } => Some(value),
            Self::EmptySubmission => None,
        }
    }
}

/// Serialized form of a failure, stored under the `error` key of an error
/// handler's value.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub work: String,
    pub message: String,
    pub retryable: bool,
    pub attempts: u32,
}

impl FailureReport {
    pub fn new(work: &str, error: &WorkError, attempts: u32) -> Self {
        Self {
            work: work.to_string(),
            message: error.to_string(),
            retryable: error.is_retryable(),
            attempts,
        }
    }

    /// Convert into a JSON value; falls back to the bare message if
    /// serialization fails.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::String(self.message.clone()))
    }
}
