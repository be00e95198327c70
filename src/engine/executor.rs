// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The work chain executor.
//!
//! A submission runs as a single driver loop. Each pass takes one work item
//! through the same steps:
//!
//! ```text
//! PENDING -> (initial delay) -> ATTEMPTING
//!     ATTEMPTING -> SUCCEEDED -> EJECTED                (chain ends with the value)
//!                             -> FAN-OUT + CONTINUED    (tasks spawned, `next` becomes pending)
//!                             -> FAN-OUT + complete     (no `next`: chain ends with the value)
//!     ATTEMPTING -> FAILED    -> RETRYING -> ATTEMPTING (budget left, error retryable)
//!                             -> ERROR-ROUTED           (handler becomes pending)
//!                             -> TERMINATED             (no handler)
//! ```
//!
//! Retries stay inside one pass and keep the record's id and attempt count.
//! `next` and error handlers become the next pass, renormalized exactly as a
//! fresh submission would be. Fan-out tasks are spawned as independent
//! submissions that the driver never waits on.
//!
//! # Example
//! ```rust
//! use the_workchain::engine::Executor;
//! use the_workchain::traits::{operation_fn, WorkExecutor};
//! use the_workchain::work::{Outcome, Work};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Executor::new();
//!
//! let increment = |name: &str| {
//!     Work::new(name, operation_fn(|value| async move {
//!         let n = value.get("n").and_then(|n| n.as_i64()).unwrap_or(0);
//!         Ok(Outcome::with([("n", n + 1)]))
//!     }))
//! };
//!
//! let chain = increment("a").with_value([("n", 1)]).then(increment("b"));
//! let result = executor.submit(chain.into()).await?;
//!
//! assert_eq!(result.and_then(|v| v.get("n").cloned()), Some(serde_json::json!(3)));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::Instrument;

use crate::engine::record::WorkRecord;
use crate::engine::{ExecutorBuilder, Submission};
use crate::errors::{ExecutionError, FailureReport, WorkError};
use crate::identity::IdGenerator;
use crate::observability::messages::work::{
    ChainCompleted, ChainSubmitted, ChainTerminated, ErrorHandlerSubmitted, InitialDelay,
    NextSubmitted, RetryBypassed, TaskChainFailed, TaskSubmitted, WorkCompleted, WorkEjected,
    WorkFailed, WorkRetrying, WorkStarted,
};
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::traits::WorkExecutor;
use crate::utils::{overlay, with_error};
use crate::work::{chain, Outcome, RetryDelay, Work, WorkValue};

/// Runs work items and the chains hanging off them.
///
/// Cloning is cheap and every clone shares configuration, the in-flight
/// counter and the fan-out task tracker. Submissions must happen inside a
/// Tokio runtime, since fan-out tasks are spawned onto it.
#[derive(Clone)]
pub struct Executor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    module: String,
    retry_default: u32,
    retry_delay: Option<RetryDelay>,
    error_with_value: bool,
    log: Arc<dyn Logger>,
    ids: Arc<dyn IdGenerator>,
    /// Attempts currently inside an operation call. Diagnostic only.
    active_work: AtomicUsize,
    tasks: TaskTracker,
}

/// Where the driver goes after one pass.
enum Step {
    Continue(Work),
    Finished(Option<WorkValue>),
}

/// Keeps the in-flight counter balanced even if an attempt is dropped
/// mid-await.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

impl Executor {
    /// An executor with every default: no retries, no retry delay, silent
    /// diagnostics, unrouted failures swallowed.
    pub fn new() -> Self {
        ExecutorBuilder::new().build()
    }

    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }

    pub(crate) fn from_parts(
        module: String,
        retry_default: u32,
        retry_delay: Option<RetryDelay>,
        error_with_value: bool,
        log: Arc<dyn Logger>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            inner: Arc::new(ExecutorInner {
                module,
                retry_default,
                retry_delay,
                error_with_value,
                log,
                ids,
                active_work: AtomicUsize::new(0),
                tasks: TaskTracker::new(),
            }),
        }
    }

    pub fn module(&self) -> &str {
        &self.inner.module
    }

    pub fn default_retry(&self) -> u32 {
        self.inner.retry_default
    }

    /// Number of operation calls currently running across all chains.
    pub fn in_flight(&self) -> usize {
        self.inner.active_work.load(Ordering::Relaxed)
    }

    /// Wait until every fan-out task spawned so far, and every task those
    /// spawn in turn, has reached a terminal state.
    ///
    /// `submit` never waits for fan-out tasks; this is for shutdown and
    /// tests. Concurrent callers of this method should not overlap.
    pub async fn wait_for_tasks(&self) {
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        self.inner.tasks.reopen();
    }

    /// Link `next` onto the tail of `work`'s chain.
    pub fn link(work: Option<Work>, next: Work) -> Work {
        chain::link(work, next)
    }

    /// Link a sequence into one chain and return its head.
    pub fn link_sequence(items: Vec<Work>) -> Option<Work> {
        chain::link_sequence(items)
    }

    fn log(&self) -> &dyn Logger {
        self.inner.log.as_ref()
    }

    async fn drive(&self, head: Work) -> Result<Option<WorkValue>, ExecutionError> {
        let module = self.module();
        let mut pending = head;

        loop {
            let mut record =
                WorkRecord::prepare(pending, self.inner.retry_default, self.inner.ids.as_ref());

            if let Some(delay) = record.work.initial_delay {
                self.log().debug(
                    &InitialDelay {
                        module,
                        name: &record.work.name,
                        id: &record.id,
                        delay,
                    }
                    .to_string(),
                );
                tokio::time::sleep(delay).await;
            }

            let step = match self.attempt(&mut record).await {
                Ok(outcome) => self.advance(record, outcome),
                Err(error) => self.route_failure(record, error)?,
            };

            match step {
                Step::Continue(work) => pending = work,
                Step::Finished(value) => return Ok(value),
            }
        }
    }

    /// Call the operation until it succeeds, fails without retry, or the
    /// budget runs out.
    async fn attempt(&self, record: &mut WorkRecord) -> Result<Outcome, WorkError> {
        let module = self.module();

        loop {
            record.attempted += 1;
            self.log().debug(
                &WorkStarted {
                    module,
                    name: &record.work.name,
                    id: &record.id,
                    attempt: record.attempted,
                }
                .to_string(),
            );

            let result = {
                let _in_flight = InFlight::enter(&self.inner.active_work);
                record.work.operation.call(record.work.value.clone()).await
            };

            let error = match result {
                Ok(outcome) => {
                    self.log().debug(
                        &WorkCompleted {
                            module,
                            name: &record.work.name,
                            id: &record.id,
                            attempt: record.attempted,
                        }
                        .to_string(),
                    );
                    return Ok(outcome);
                }
                Err(error) => error,
            };

            self.log().error(
                &WorkFailed {
                    module,
                    name: &record.work.name,
                    id: &record.id,
                    attempt: record.attempted,
                    error: &error,
                }
                .to_string(),
            );

            if !error.is_retryable() {
                self.log().debug(
                    &RetryBypassed {
                        module,
                        name: &record.work.name,
                        id: &record.id,
                        remaining: record.retry,
                        attempts: record.attempted,
                    }
                    .to_string(),
                );
                return Err(error);
            }

            if record.retry == 0 {
                return Err(error);
            }

            record.retry -= 1;
            let delay = record
                .work
                .retry_delay
                .as_ref()
                .or(self.inner.retry_delay.as_ref())
                .map(|d| d.delay_for(record.attempted))
                .unwrap_or(Duration::ZERO);

            self.log().debug(
                &WorkRetrying {
                    module,
                    name: &record.work.name,
                    id: &record.id,
                    remaining: record.retry,
                    delay,
                }
                .to_string(),
            );

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Interpret a successful outcome: fan out tasks and pick the next item.
    fn advance(&self, record: WorkRecord, outcome: Outcome) -> Step {
        let module = self.module();
        let WorkRecord { mut work, id, .. } = record;
        let name = std::mem::take(&mut work.name);
        let next = work.next.take();
        let tasks = std::mem::take(&mut work.tasks);

        let (value, extra_tasks) = match outcome {
            Outcome::Eject(value) => {
                self.log().debug(
                    &WorkEjected {
                        module,
                        name: &name,
                        id: &id,
                        dropped_tasks: tasks.len(),
                        dropped_next: next.is_some(),
                    }
                    .to_string(),
                );
                return Step::Finished(Some(value));
            }
            outcome => outcome.into_parts(),
        };

        for task in tasks.into_iter().chain(extra_tasks) {
            self.fan_out(&name, &id, task, &value);
        }

        match next {
            Some(next) => {
                let mut next = *next;
                self.log().debug(
                    &NextSubmitted {
                        module,
                        current: &name,
                        next: &next.name,
                        id: &id,
                    }
                    .to_string(),
                );
                next.value = overlay(std::mem::take(&mut next.value), value);
                next.id = Some(id);
                Step::Continue(next)
            }
            None => {
                self.log().debug(
                    &ChainCompleted {
                        module,
                        name: &name,
                        id: &id,
                    }
                    .to_string(),
                );
                Step::Finished(Some(value))
            }
        }
    }

    /// Spawn a task as its own submission. The task's staged value is the
    /// base and the triggering result is laid over it.
    fn fan_out(&self, parent: &str, id: &str, mut task: Work, value: &WorkValue) {
        self.log().debug(
            &TaskSubmitted {
                module: self.module(),
                parent,
                task: &task.name,
                id,
            }
            .to_string(),
        );

        task.value = overlay(std::mem::take(&mut task.value), value.clone());
        task.id = Some(id.to_string());

        let executor = self.clone();
        let task_name = task.name.clone();
        let id = id.to_string();
        self.inner.tasks.spawn(async move {
            if let Err(error) = executor.submit(Submission::from(task)).await {
                executor.log().warn(
                    &TaskChainFailed {
                        module: executor.module(),
                        task: &task_name,
                        id: &id,
                        error: &error,
                    }
                    .to_string(),
                );
            }
        });
    }

    /// Send a terminal failure to the item's error handler, or end the chain.
    fn route_failure(&self, record: WorkRecord, error: WorkError) -> Result<Step, ExecutionError> {
        let module = self.module();
        let WorkRecord {
            mut work,
            id,
            attempted,
            ..
        } = record;

        let Some(handler) = work.error.take() else {
            self.log().error(
                &ChainTerminated {
                    module,
                    name: &work.name,
                    id: &id,
                    attempts: attempted,
                    error: &error,
                }
                .to_string(),
            );
            if self.inner.error_with_value {
                return Err(ExecutionError::Unrouted {
                    work: std::mem::take(&mut work.name),
                    id,
                    attempts: attempted,
                    source: error,
                    value: std::mem::take(&mut work.value),
                });
            }
            return Ok(Step::Finished(None));
        };

        let mut handler = *handler;
        let report = FailureReport::new(&work.name, &error, attempted);
        handler.value = with_error(&work.value, report.to_value());
        handler.id = Some(id.clone());

        // A handler without its own continuation picks up the failed item's
        // chain: its `next`, and its tasks after the handler's own.
        let rescued = handler.next.is_none();
        if rescued {
            handler.next = work.next.take();
            handler.tasks.append(&mut work.tasks);
        }

        self.log().error(
            &ErrorHandlerSubmitted {
                module,
                name: &work.name,
                handler: &handler.name,
                id: &id,
                rescued,
            }
            .to_string(),
        );

        Ok(Step::Continue(handler))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkExecutor for Executor {
    async fn submit(&self, submission: Submission) -> Result<Option<WorkValue>, ExecutionError> {
        let mut head = submission
            .into_head()
            .ok_or(ExecutionError::EmptySubmission)?;
        let id = head
            .id
            .get_or_insert_with(|| self.inner.ids.generate())
            .clone();

        let span = {
            let msg = ChainSubmitted {
                module: self.module(),
                name: &head.name,
                id: &id,
                chain_len: head.chain_len(),
            };
            self.log().debug(&msg.to_string());
            msg.span("submit")
        };

        self.drive(head).instrument(span).await
    }
}
