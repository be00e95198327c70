// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::traits::Operation;
use crate::work::{chain, RetryDelay, WorkValue};

/// A named unit of asynchronous work plus its chain wiring.
///
/// Items own their successors: `next` is the single continuation that
/// receives this item's result, `tasks` are fire-and-forget branches, and
/// `error` is the handler invoked when the item fails terminally.
///
/// # Example
/// ```
/// use the_workchain::traits::operation_fn;
/// use the_workchain::work::{Outcome, Work};
///
/// let work = Work::new("double", operation_fn(|value| async move {
///     let n = value.get("n").and_then(|n| n.as_i64()).unwrap_or(0);
///     Ok(Outcome::with([("n", n * 2)]))
/// }))
/// .with_value([("n", 21)])
/// .with_retry(2);
///
/// assert_eq!(work.retry, Some(2));
/// ```
#[derive(Clone)]
pub struct Work {
    pub name: String,
    pub operation: Arc<dyn Operation>,
    pub value: WorkValue,
    pub next: Option<Box<Work>>,
    pub tasks: Vec<Work>,
    pub error: Option<Box<Work>>,
    /// Remaining retry budget; `None` defers to the executor default.
    pub retry: Option<u32>,
    /// Overrides the executor's retry delay for this item.
    pub retry_delay: Option<RetryDelay>,
    /// Wait before the first attempt only.
    pub initial_delay: Option<Duration>,
    /// Correlation id, generated at submission when absent.
    pub id: Option<String>,
}

impl Work {
    pub fn new(name: impl Into<String>, operation: Arc<dyn Operation>) -> Self {
        Self {
            name: name.into(),
            operation,
            value: WorkValue::new(),
            next: None,
            tasks: Vec::new(),
            error: None,
            retry: None,
            retry_delay: None,
            initial_delay: None,
            id: None,
        }
    }

    /// Merge `(key, value)` pairs into the staged input.
    pub fn with_value<K, V, I>(mut self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in pairs {
            self.value.insert(k.into(), v.into());
        }
        self
    }

    /// Replace the staged input wholesale.
    pub fn with_input(mut self, value: WorkValue) -> Self {
        self.value = value;
        self
    }

    /// Append `next` at the tail of this item's chain.
    pub fn then(mut self, next: Work) -> Self {
        chain::append(&mut self, next);
        self
    }

    pub fn with_task(mut self, task: Work) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Work>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    pub fn on_error(mut self, handler: Work) -> Self {
        self.error = Some(Box::new(handler));
        self
    }

    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_retry_delay(mut self, delay: RetryDelay) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Number of items reachable by following `next` from here, this one
    /// included.
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut cursor = self.next.as_deref();
        while let Some(work) = cursor {
            len += 1;
            cursor = work.next.as_deref();
        }
        len
    }

    /// Names along the `next` chain, head first.
    pub fn chain_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        let mut cursor = self.next.as_deref();
        while let Some(work) = cursor {
            names.push(work.name.as_str());
            cursor = work.next.as_deref();
        }
        names
    }
}

impl fmt::Debug for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Work")
            .field("name", &self.name)
            .field("operation", &self.operation.name())
            .field("value", &self.value)
            .field("next", &self.next.as_ref().map(|n| n.name.as_str()))
            .field("task_count", &self.tasks.len())
            .field("error", &self.error.as_ref().map(|e| e.name.as_str()))
            .field("retry", &self.retry)
            .field("retry_delay", &self.retry_delay)
            .field("initial_delay", &self.initial_delay)
            .field("id", &self.id)
            .finish()
    }
}

/// Unlinks the `next` chain one item at a time. The derived drop would
/// recurse once per item and overflow the stack on long chains.
impl Drop for Work {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut work) = next {
            next = work.next.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::operation_fn;
    use crate::work::Outcome;
    use serde_json::json;

    fn noop(name: &str) -> Work {
        Work::new(name, operation_fn(|v| async move { Ok(Outcome::from(v)) }))
    }

    #[test]
    fn builder_sets_fields() {
        let work = noop("a")
            .with_value([("n", 1)])
            .with_retry(3)
            .with_initial_delay(Duration::from_millis(5))
            .with_id("corr")
            .with_task(noop("t"))
            .on_error(noop("e"));

        assert_eq!(work.value.get("n"), Some(&json!(1)));
        assert_eq!(work.retry, Some(3));
        assert_eq!(work.initial_delay, Some(Duration::from_millis(5)));
        assert_eq!(work.id.as_deref(), Some("corr"));
        assert_eq!(work.tasks.len(), 1);
        assert_eq!(work.error.as_ref().map(|e| e.name.as_str()), Some("e"));
    }

    #[test]
    fn then_appends_at_tail() {
        let work = noop("a").then(noop("b")).then(noop("c"));
        assert_eq!(work.chain_names(), vec!["a", "b", "c"]);
        assert_eq!(work.chain_len(), 3);
    }

    #[test]
    fn dropping_long_chain_does_not_recurse() {
        let mut head = noop("w0");
        let mut tail = &mut head;
        for i in 1..200_000 {
            tail = chain::append(tail, noop(&format!("w{i}")));
        }
        assert_eq!(head.chain_len(), 200_000);
        drop(head);
    }

    #[test]
    fn debug_shows_wiring_names() {
        let work = noop("a").then(noop("b"));
        let rendered = format!("{:?}", work);
        assert!(rendered.contains("next: Some(\"b\")"));
    }
}
