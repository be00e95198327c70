// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `work` - work item lifecycle: attempts, retries, routing, continuation
//! * `config` - configuration loading and validation

pub mod config;
pub mod work;

use tracing::Span;

/// Messages that log themselves straight to `tracing` with structured
/// fields, bypassing the executor's logger capability.
pub trait StructuredLog {
    fn log(&self);

    fn span(&self, name: &str) -> Span;
}
