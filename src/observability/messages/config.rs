// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading and validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Executor configuration loaded from disk.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_workchain::observability::messages::config::ConfigLoaded;
///
/// let msg = ConfigLoaded {
///     path: "executor.yaml",
///     format: "yaml",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub format: &'a str,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loaded {} executor config from {}", self.format, self.path)
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(path = self.path, format = self.format, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "config_loaded",
            span_name = name,
            path = self.path,
            format = self.format,
        )
    }
}

/// A configuration field failed validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConfigFieldInvalid<'a> {
    pub field: &'a str,
    pub reason: &'a str,
}

impl Display for ConfigFieldInvalid<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid config field '{}': {}", self.field, self.reason)
    }
}

impl StructuredLog for ConfigFieldInvalid<'_> {
    fn log(&self) {
        tracing::error!(field = self.field, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "config_field_invalid",
            span_name = name,
            field = self.field,
            reason = self.reason,
        )
    }
}
