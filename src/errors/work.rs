// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failures raised by work operations.

use thiserror::Error;

/// Error returned by a work item's operation.
///
/// The variant decides whether the executor may spend retry budget on the
/// failure. A `NoRetry` failure skips straight to the error handler (or to
/// termination) no matter how many retries remain.
#[derive(Error, Debug)]
pub enum WorkError {
    /// Transient failure, consumes one unit of retry budget.
    #[error("{0}")]
    Retryable(#[source] anyhow::Error),

    /// Failure that will not succeed on another attempt.
    #[error("{0}")]
    NoRetry(#[source] anyhow::Error),
}

impl WorkError {
    /// Create a retryable error.
    pub fn retryable(err: impl Into<anyhow::Error>) -> Self {
        Self::Retryable(err.into())
    }

    /// Create an error that bypasses the retry budget.
    pub fn no_retry(err: impl Into<anyhow::Error>) -> Self {
        Self::NoRetry(err.into())
    }

    /// Create a retryable error from a plain message.
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self::Retryable(anyhow::Error::msg(message))
    }

    /// Returns true if this error is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}
