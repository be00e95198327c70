// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::work::{link_sequence, Work};

/// What `submit` accepts: one work item, or a sequence to be linked into a
/// chain before it runs.
#[derive(Debug, Clone)]
pub enum Submission {
    Single(Work),
    Sequence(Vec<Work>),
}

impl Submission {
    /// The head of the chain to run; `None` for an empty sequence.
    pub fn into_head(self) -> Option<Work> {
        match self {
            Self::Single(work) => Some(work),
            Self::Sequence(items) => link_sequence(items),
        }
    }
}

impl From<Work> for Submission {
    fn from(work: Work) -> Self {
        Self::Single(work)
    }
}

impl From<Vec<Work>> for Submission {
    fn from(items: Vec<Work>) -> Self {
        Self::Sequence(items)
    }
}
