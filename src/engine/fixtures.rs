// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Operations and capabilities shared by the executor tests.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::errors::WorkError;
use crate::identity::IdGenerator;
use crate::observability::Logger;
use crate::traits::{operation_fn, Operation};
use crate::work::{Outcome, Work, WorkValue};

/// Returns its input unchanged.
pub struct PassthroughOperation;

#[async_trait::async_trait]
impl Operation for PassthroughOperation {
    async fn call(&self, input: WorkValue) -> Result<Outcome, WorkError> {
        Ok(Outcome::Continue(input))
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

pub fn passthrough(name: &str) -> Work {
    Work::new(name, Arc::new(PassthroughOperation))
}

/// Fails the first `failures` calls, then passes its input through.
pub struct FailingOperation {
    failures: u32,
    retryable: bool,
    calls: Arc<AtomicU32>,
}

#[async_trait::async_trait]
impl Operation for FailingOperation {
    async fn call(&self, input: WorkValue) -> Result<Outcome, WorkError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call > self.failures {
            return Ok(Outcome::Continue(input));
        }

        let cause = anyhow::anyhow!("simulated failure on call {}", call);
        if self.retryable {
            Err(WorkError::retryable(cause))
        } else {
            Err(WorkError::no_retry(cause))
        }
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A work item that fails `failures` times, plus its call counter.
pub fn failing(name: &str, failures: u32, retryable: bool) -> (Work, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let op = FailingOperation {
        failures,
        retryable,
        calls: calls.clone(),
    };
    (Work::new(name, Arc::new(op)), calls)
}

/// Passes its input through and reports every input it saw on a channel.
pub fn recording(name: &str) -> (Work, mpsc::UnboundedReceiver<(String, WorkValue)>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let label = name.to_string();
    let work = Work::new(
        name,
        operation_fn(move |input: WorkValue| {
            let _ = tx.send((label.clone(), input.clone()));
            async move { Ok(Outcome::Continue(input)) }
        }),
    );
    (work, rx)
}

/// Increments the integer under `n`, treating a missing key as zero.
pub fn add_one(name: &str) -> Work {
    Work::new(
        name,
        operation_fn(|input: WorkValue| async move {
            let n = input.get("n").and_then(|n| n.as_i64()).unwrap_or(0);
            Ok(Outcome::with([("n", n + 1)]))
        }),
    )
}

/// Appends `suffix` to the string under `key` and keeps every other key.
pub fn concat(name: &str, key: &'static str, suffix: &'static str) -> Work {
    Work::new(
        name,
        operation_fn(move |mut input: WorkValue| async move {
            let current = input
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            input.insert(key.to_string(), format!("{current}{suffix}").into());
            Ok(Outcome::Continue(input))
        }),
    )
}

/// Predictable ids: `id-1`, `id-2`, ...
#[derive(Default)]
pub struct SequentialIds {
    issued: AtomicUsize,
}

impl SequentialIds {
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        format!("id-{n}")
    }
}

/// Keeps every line it is handed, tagged with its level.
#[derive(Default)]
pub struct CapturingLogger {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl CapturingLogger {
    fn push(&self, level: &'static str, msg: &str) {
        self.lines.lock().unwrap().push((level, msg.to_string()));
    }

    pub fn lines(&self) -> Vec<(&'static str, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn at_level(&self, level: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line)
            .collect()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(fragment))
    }
}

impl Logger for CapturingLogger {
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }

    fn info(&self, msg: &str) {
        self.push("info", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
}
