// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! All problems are collected before returning so a bad file reports every
//! offending field at once. Each problem is also logged as a structured
//! `error!` event.

use crate::config::{ExecutorConfig, RetryDelayConfig};
use crate::errors::ConfigError;
use crate::observability::messages::config::ConfigFieldInvalid;
use crate::observability::messages::StructuredLog;

pub fn validate_config(cfg: &ExecutorConfig) -> Result<(), ConfigError> {
    let mut problems: Vec<(&str, String)> = Vec::new();

    if let Some(module) = &cfg.module {
        if module.trim().is_empty() {
            problems.push(("module", "must not be blank".to_string()));
        }
    }

    if let Some(RetryDelayConfig::Exponential { initial_ms, max_ms }) = &cfg.retry_delay {
        if initial_ms > max_ms {
            problems.push((
                "retry_delay",
                format!("initial_ms ({initial_ms}) exceeds max_ms ({max_ms})"),
            ));
        }
    }

    if problems.is_empty() {
        return Ok(());
    }

    let messages = problems
        .iter()
        .map(|(field, reason)| {
            let msg = ConfigFieldInvalid { field, reason };
            msg.log();
            msg.to_string()
        })
        .collect();

    Err(ConfigError::Invalid(messages))
}
