// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::identity::IdGenerator;
use crate::work::Work;

/// A work item in flight, with the bookkeeping the executor owns.
///
/// `retry` is the remaining budget and counts down; `attempted` counts up
/// and is bumped right before each call to the operation, so the first
/// attempt observes 1.
#[derive(Debug)]
pub(crate) struct WorkRecord {
    pub work: Work,
    pub id: String,
    pub retry: u32,
    pub attempted: u32,
}

impl WorkRecord {
    /// Normalize a submitted item: keep its id and retry budget when set,
    /// otherwise generate an id and fall back to the executor default.
    pub fn prepare(mut work: Work, default_retry: u32, ids: &dyn IdGenerator) -> Self {
        let id = work.id.take().unwrap_or_else(|| ids.generate());
        let retry = work.retry.unwrap_or(default_retry);
        Self {
            work,
            id,
            retry,
            attempted: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{passthrough, SequentialIds};

    #[test]
    fn prepare_generates_missing_id_and_default_retry() {
        let ids = SequentialIds::default();
        let record = WorkRecord::prepare(passthrough("a"), 2, &ids);
        assert_eq!(record.id, "id-1");
        assert_eq!(record.retry, 2);
        assert_eq!(record.attempted, 0);
    }

    #[test]
    fn prepare_respects_existing_id_and_retry() {
        let ids = SequentialIds::default();
        let work = passthrough("a").with_id("given").with_retry(0);
        let record = WorkRecord::prepare(work, 5, &ids);
        assert_eq!(record.id, "given");
        assert_eq!(record.retry, 0);
        assert_eq!(ids.issued(), 0);
    }
}
