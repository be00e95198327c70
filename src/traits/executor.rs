// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::engine::Submission;
use crate::errors::ExecutionError;
use crate::work::WorkValue;

#[async_trait]
pub trait WorkExecutor: Send + Sync {
    /// Run a work item, or a sequence linked into one chain, to a terminal
    /// state.
    ///
    /// Returns:
    /// - `Ok(Some(value))`: the value produced by the last item of the chain
    /// - `Ok(None)`: the chain failed with no error handler and the failure
    ///   was logged and dropped
    /// - `Err(ExecutionError)`: the submission was empty, or the chain failed
    ///   unrouted and the executor surfaces such failures
    async fn submit(&self, submission: Submission) -> Result<Option<WorkValue>, ExecutionError>;
}
