// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Diagnostic sink injected into the executor.
pub trait Logger: Send + Sync {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Discards everything. The executor's logger unless debug is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogger;

impl Logger for SilentLogger {
    fn debug(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Forwards to the `tracing` macros. The executor's module label moves
/// from the start of the message into a `module` field, so it is rendered
/// once.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    module: String,
}

impl TracingLogger {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// The message without its leading module label.
    fn body<'a>(&self, msg: &'a str) -> &'a str {
        msg.strip_prefix(self.module.as_str())
            .map(str::trim_start)
            .unwrap_or(msg)
    }
}

impl Logger for TracingLogger {
    fn debug(&self, msg: &str) {
        tracing::debug!(module = %self.module, "{}", self.body(msg));
    }

    fn info(&self, msg: &str) {
        tracing::info!(module = %self.module, "{}", self.body(msg));
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(module = %self.module, "{}", self.body(msg));
    }

    fn error(&self, msg: &str) {
        tracing::error!(module = %self.module, "{}", self.body(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_label_is_not_repeated_in_message() {
        let logger = TracingLogger::new("[Executor]");
        assert_eq!(
            logger.body("[Executor] work 'a' (id 1) attempt 1 started"),
            "work 'a' (id 1) attempt 1 started"
        );
    }

    #[test]
    fn foreign_messages_pass_through() {
        let logger = TracingLogger::new("[Executor]");
        assert_eq!(logger.body("[Other] hello"), "[Other] hello");
        assert_eq!(logger.body("plain"), "plain");
    }
}
