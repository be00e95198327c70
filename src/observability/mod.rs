// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability: the logger capability the executor reports through, the
//! message types it reports, and subscriber setup.
//!
//! Message types follow a struct-based pattern with `Display` so the
//! executor never formats ad-hoc strings. The executor hands the rendered
//! message to its injected [`Logger`]; by default that is [`SilentLogger`],
//! and in debug mode [`TracingLogger`], which forwards to `tracing`.
//!
//! # Usage
//!
//! ```rust
//! use the_workchain::observability::messages::work::WorkStarted;
//! use the_workchain::observability::{Logger, TracingLogger};
//!
//! let msg = WorkStarted {
//!     module: "[Executor]",
//!     name: "fetch",
//!     id: "b1946ac9",
//!     attempt: 1,
//! };
//!
//! TracingLogger::new("[Executor]").debug(&msg.to_string());
//! ```

mod logger;
pub mod messages;

pub use logger::{Logger, SilentLogger, TracingLogger};

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns false when a
/// global subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
