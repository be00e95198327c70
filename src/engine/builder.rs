// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::consts::{DEFAULT_MODULE, DEFAULT_RETRY};
use crate::config::ExecutorConfig;
use crate::engine::Executor;
use crate::identity::{IdGenerator, UuidGenerator};
use crate::observability::{Logger, SilentLogger, TracingLogger};
use crate::work::RetryDelay;

/// Construction-time configuration for an [`Executor`].
///
/// # Examples
///
/// ## Building from a loaded config
/// ```
/// use the_workchain::config::parse_yaml;
/// use the_workchain::engine::ExecutorBuilder;
///
/// let cfg = parse_yaml("retry: 2\nmodule: \"[Ingest]\"\n").unwrap();
/// let executor = ExecutorBuilder::from_config(&cfg).build();
///
/// assert_eq!(executor.module(), "[Ingest]");
/// assert_eq!(executor.default_retry(), 2);
/// ```
pub struct ExecutorBuilder {
    retry: u32,
    retry_delay: Option<RetryDelay>,
    module: String,
    debug: bool,
    logger: Option<Arc<dyn Logger>>,
    id_generator: Option<Arc<dyn IdGenerator>>,
    error_with_value: bool,
}

impl ExecutorBuilder {
    pub fn new() -> Self {
        Self {
            retry: DEFAULT_RETRY,
            retry_delay: None,
            module: DEFAULT_MODULE.to_string(),
            debug: false,
            logger: None,
            id_generator: None,
            error_with_value: false,
        }
    }

    /// Seed a builder from file-based configuration. Injected capabilities
    /// (logger, id generator, custom delays) can still be layered on after.
    pub fn from_config(cfg: &ExecutorConfig) -> Self {
        Self {
            retry: cfg.retry_or_default(),
            retry_delay: cfg.retry_delay(),
            module: cfg.module_or_default().to_string(),
            debug: cfg.debug,
            logger: None,
            id_generator: None,
            error_with_value: cfg.error_with_value,
        }
    }

    /// Default retry budget for items that do not set their own.
    pub fn retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    /// Default pacing between retries for items that do not set their own.
    pub fn retry_delay(mut self, delay: RetryDelay) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Report diagnostics. Without this every message is discarded, even
    /// when a logger was supplied.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(ids);
        self
    }

    /// Surface unrouted failures to the caller with the in-flight value.
    pub fn error_with_value(mut self, enabled: bool) -> Self {
        self.error_with_value = enabled;
        self
    }

    pub fn build(self) -> Executor {
        let log: Arc<dyn Logger> = if self.debug {
            self.logger
                .unwrap_or_else(|| Arc::new(TracingLogger::new(self.module.clone())))
        } else {
            Arc::new(SilentLogger)
        };
        let ids = self
            .id_generator
            .unwrap_or_else(|| Arc::new(UuidGenerator));

        Executor::from_parts(
            self.module,
            self.retry,
            self.retry_delay,
            self.error_with_value,
            log,
            ids,
        )
    }
}

impl Default for ExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
