// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::errors::WorkError;
use crate::work::{Outcome, WorkValue};

/// The function a work item runs.
///
/// Receives the item's accumulated value and produces an [`Outcome`], or
/// fails with a [`WorkError`] whose variant decides whether a retry is
/// worthwhile.
#[async_trait]
pub trait Operation: Send + Sync {
    async fn call(&self, input: WorkValue) -> Result<Outcome, WorkError>;

    fn name(&self) -> &'static str {
        "operation"
    }
}

/// Adapts an async closure into an [`Operation`].
pub struct FnOperation<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Operation for FnOperation<F>
where
    F: Fn(WorkValue) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Outcome, WorkError>> + Send + 'static,
{
    async fn call(&self, input: WorkValue) -> Result<Outcome, WorkError> {
        (self.f)(input).await
    }

    fn name(&self) -> &'static str {
        "fn"
    }
}

/// Wrap an async closure as a shareable operation.
pub fn operation_fn<F, Fut>(f: F) -> Arc<dyn Operation>
where
    F: Fn(WorkValue) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Outcome, WorkError>> + Send + 'static,
{
    Arc::new(FnOperation { f })
}
