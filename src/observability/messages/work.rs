// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the work item lifecycle.
//!
//! Every message carries the executor's `module` label and the correlation
//! `id` shared by the whole execution tree, so one submission can be
//! followed across `next`, task and error-handler hops.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A chain entry point was submitted.
///
/// # Log Level
/// `debug!` - Lifecycle detail
///
/// # Example
/// ```
/// use the_workchain::observability::messages::work::ChainSubmitted;
///
/// let msg = ChainSubmitted {
///     module: "[Executor]",
///     name: "ingest",
///     id: "b1946ac9",
///     chain_len: 3,
/// };
///
/// assert_eq!(msg.to_string(), "[Executor] submitted 'ingest' (id b1946ac9), chain length 3");
/// ```
pub struct ChainSubmitted<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub chain_len: usize,
}

impl Display for ChainSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} submitted '{}' (id {}), chain length {}",
            self.module, self.name, self.id, self.chain_len
        )
    }
}

impl StructuredLog for ChainSubmitted<'_> {
    fn log(&self) {
        tracing::debug!(
            module = self.module,
            work = self.name,
            id = self.id,
            chain_len = self.chain_len,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "chain",
            span_name = name,
            module = self.module,
            id = self.id,
        )
    }
}

/// Waiting out a work item's initial delay.
pub struct InitialDelay<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub delay: Duration,
}

impl Display for InitialDelay<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) waiting {:?} before first attempt",
            self.module, self.name, self.id, self.delay
        )
    }
}

/// An attempt is about to invoke the operation.
///
/// # Log Level
/// `debug!` - Lifecycle detail
pub struct WorkStarted<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub attempt: u32,
}

impl Display for WorkStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) attempt {} started",
            self.module, self.name, self.id, self.attempt
        )
    }
}

/// The operation returned successfully.
pub struct WorkCompleted<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub attempt: u32,
}

impl Display for WorkCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) completed on attempt {}",
            self.module, self.name, self.id, self.attempt
        )
    }
}

/// The operation asked to terminate the chain.
pub struct WorkEjected<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub dropped_tasks: usize,
    pub dropped_next: bool,
}

impl Display for WorkEjected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) ejected, dropping {} task(s){}",
            self.module,
            self.name,
            self.id,
            self.dropped_tasks,
            if self.dropped_next { " and next" } else { "" }
        )
    }
}

/// A fan-out task was handed off.
pub struct TaskSubmitted<'a> {
    pub module: &'a str,
    pub parent: &'a str,
    pub task: &'a str,
    pub id: &'a str,
}

impl Display for TaskSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) fanning out task '{}'",
            self.module, self.parent, self.id, self.task
        )
    }
}

/// A fan-out task's own chain ended with a surfaced failure.
///
/// # Log Level
/// `warn!` - The parent chain is unaffected
pub struct TaskChainFailed<'a> {
    pub module: &'a str,
    pub task: &'a str,
    pub id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskChainFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} task '{}' (id {}) failed: {}",
            self.module, self.task, self.id, self.error
        )
    }
}

/// Continuing to the next item of the chain.
pub struct NextSubmitted<'a> {
    pub module: &'a str,
    pub current: &'a str,
    pub next: &'a str,
    pub id: &'a str,
}

impl Display for NextSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) continuing with '{}'",
            self.module, self.current, self.id, self.next
        )
    }
}

/// The chain reached an item with no `next`.
pub struct ChainCompleted<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
}

impl Display for ChainCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} chain complete at '{}' (id {})",
            self.module, self.name, self.id
        )
    }
}

/// An attempt failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_workchain::observability::messages::work::WorkFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
/// let msg = WorkFailed {
///     module: "[Executor]",
///     name: "fetch",
///     id: "b1946ac9",
///     attempt: 2,
///     error: &error,
/// };
///
/// assert!(msg.to_string().contains("connection reset"));
/// ```
pub struct WorkFailed<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub attempt: u32,
    pub error: &'a dyn std::error::Error,
}

impl Display for WorkFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) attempt {} failed: {}",
            self.module, self.name, self.id, self.attempt, self.error
        )
    }
}

/// A non-retryable failure skipped the remaining retry budget.
pub struct RetryBypassed<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub remaining: u32,
    pub attempts: u32,
}

impl Display for RetryBypassed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) raised a no-retry error, skipping {} remaining retries after {} attempt(s)",
            self.module, self.name, self.id, self.remaining, self.attempts
        )
    }
}

/// Retrying after a delay.
pub struct WorkRetrying<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub remaining: u32,
    pub delay: Duration,
}

impl Display for WorkRetrying<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) retrying after {:?}, {} retries left",
            self.module, self.name, self.id, self.delay, self.remaining
        )
    }
}

/// A failure was routed to the item's error handler.
pub struct ErrorHandlerSubmitted<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub handler: &'a str,
    pub id: &'a str,
    pub rescued: bool,
}

impl Display for ErrorHandlerSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} work '{}' (id {}) failed, submitting error handler '{}'{}",
            self.module,
            self.name,
            self.id,
            self.handler,
            if self.rescued { " to rescue the chain" } else { "" }
        )
    }
}

/// A failure with no handler terminated the chain.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ChainTerminated<'a> {
    pub module: &'a str,
    pub name: &'a str,
    pub id: &'a str,
    pub attempts: u32,
    pub error: &'a dyn std::error::Error,
}

impl Display for ChainTerminated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} FATAL work '{}' (id {}) failed after {} attempt(s): {}",
            self.module, self.name, self.id, self.attempts, self.error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ejected_mentions_next_only_when_dropped() {
        let with_next = WorkEjected {
            module: "[Executor]",
            name: "a",
            id: "1",
            dropped_tasks: 2,
            dropped_next: true,
        };
        assert_eq!(
            with_next.to_string(),
            "[Executor] work 'a' (id 1) ejected, dropping 2 task(s) and next"
        );

        let without_next = WorkEjected {
            dropped_next: false,
            ..with_next
        };
        assert!(!without_next.to_string().contains("next"));
    }

    #[test]
    fn terminated_is_marked_fatal() {
        let error = std::io::Error::other("disk full");
        let msg = ChainTerminated {
            module: "[Executor]",
            name: "write",
            id: "7",
            attempts: 3,
            error: &error,
        };
        assert_eq!(
            msg.to_string(),
            "[Executor] FATAL work 'write' (id 7) failed after 3 attempt(s): disk full"
        );
    }
}
