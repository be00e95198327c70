// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;
mod work;

pub use config::ConfigError;
pub use execution::{ExecutionError, FailureReport};
pub use work::WorkError;
