// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::config::consts::{DEFAULT_MODULE, DEFAULT_RETRY};
use crate::errors::ConfigError;
use crate::observability::messages::config::ConfigLoaded;
use crate::observability::messages::StructuredLog;
use crate::work::RetryDelay;

/// Construction-time configuration for an [`Executor`](crate::engine::Executor).
///
/// Every field is optional. Closures (custom retry delays, loggers, id
/// generators) cannot live in a file and are injected through
/// [`ExecutorBuilder`](crate::engine::ExecutorBuilder) instead.
///
/// # Fields
/// * `retry` - Default retry budget for items that set none (defaults to 0)
/// * `retry_delay` - Default pacing between retries (defaults to none: immediate)
/// * `module` - Label prefixed to log lines (defaults to `[Executor]`)
/// * `debug` - Report through `tracing` instead of discarding diagnostics
/// * `error_with_value` - Surface unrouted failures to the caller, with the
///   in-flight value attached, instead of resolving to nothing
///
/// # Example
/// ```yaml
/// retry: 3
/// retry_delay:
///   kind: exponential
///   initial_ms: 100
///   max_ms: 5000
/// module: "[Ingest]"
/// debug: true
/// error_with_value: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExecutorConfig {
    #[serde(default)]
    pub retry: Option<u32>,
    #[serde(default)]
    pub retry_delay: Option<RetryDelayConfig>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub error_with_value: bool,
}

impl ExecutorConfig {
    pub fn retry_or_default(&self) -> u32 {
        self.retry.unwrap_or(DEFAULT_RETRY)
    }

    pub fn module_or_default(&self) -> &str {
        self.module.as_deref().unwrap_or(DEFAULT_MODULE)
    }

    pub fn retry_delay(&self) -> Option<RetryDelay> {
        self.retry_delay.as_ref().map(RetryDelay::from)
    }
}

/// Serializable retry pacing. Durations are in milliseconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetryDelayConfig {
    Fixed { delay_ms: u64 },
    Linear { step_ms: u64 },
    Exponential { initial_ms: u64, max_ms: u64 },
}

impl From<&RetryDelayConfig> for RetryDelay {
    fn from(cfg: &RetryDelayConfig) -> Self {
        match cfg {
            RetryDelayConfig::Fixed { delay_ms } => RetryDelay::Fixed(Duration::from_millis(*delay_ms)),
            RetryDelayConfig::Linear { step_ms } => RetryDelay::Linear(Duration::from_millis(*step_ms)),
            RetryDelayConfig::Exponential { initial_ms, max_ms } => RetryDelay::Exponential {
                initial: Duration::from_millis(*initial_ms),
                max: Duration::from_millis(*max_ms),
            },
        }
    }
}

pub fn parse_yaml(content: &str) -> Result<ExecutorConfig, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn parse_toml(content: &str) -> Result<ExecutorConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a config from a YAML (`.yaml`, `.yml`) or TOML (`.toml`) file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExecutorConfig, ConfigError> {
    let path = path.as_ref();
    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => "yaml",
        Some("toml") => "toml",
        _ => {
            return Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = if format == "yaml" {
        parse_yaml(&content)?
    } else {
        parse_toml(&content)?
    };

    ConfigLoaded {
        path: &path.display().to_string(),
        format,
    }
    .log();

    Ok(cfg)
}

/// Load a config and reject values the executor cannot honor.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<ExecutorConfig, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let cfg = parse_yaml("{}").unwrap();
        assert_eq!(cfg, ExecutorConfig::default());
        assert_eq!(cfg.retry_or_default(), 0);
        assert_eq!(cfg.module_or_default(), "[Executor]");
        assert!(cfg.retry_delay().is_none());
    }

    #[test]
    fn parse_full_yaml_config() {
        let yaml = r#"
retry: 3
retry_delay:
  kind: exponential
  initial_ms: 100
  max_ms: 5000
module: "[Ingest]"
debug: true
error_with_value: true
"#;
        let cfg = parse_yaml(yaml).unwrap();
        assert_eq!(cfg.retry, Some(3));
        assert_eq!(cfg.module_or_default(), "[Ingest]");
        assert!(cfg.debug);
        assert!(cfg.error_with_value);
        assert_eq!(
            cfg.retry_delay().map(|d| d.delay_for(3)),
            Some(Duration::from_millis(400))
        );
    }

    #[test]
    fn parse_toml_config() {
        let toml = r#"
retry = 2
module = "[Billing]"

[retry_delay]
kind = "linear"
step_ms = 500
"#;
        let cfg = parse_toml(toml).unwrap();
        assert_eq!(cfg.retry, Some(2));
        assert_eq!(
            cfg.retry_delay().map(|d| d.delay_for(2)),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = parse_yaml("retries: 3\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn load_config_dispatches_on_extension() {
        let yaml = write_temp(".yaml", "retry: 1\n");
        assert_eq!(load_config(yaml.path()).unwrap().retry, Some(1));

        let toml = write_temp(".toml", "retry = 4\n");
        assert_eq!(load_config(toml.path()).unwrap().retry, Some(4));
    }

    #[test]
    fn load_config_rejects_unknown_extension() {
        let json = write_temp(".json", "{}");
        let err = load_config(json.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn load_and_validate_rejects_inverted_backoff() {
        let yaml = write_temp(
            ".yml",
            "retry_delay:\n  kind: exponential\n  initial_ms: 1000\n  max_ms: 10\n",
        );
        let err = load_and_validate_config(yaml.path()).unwrap_err();
        assert!(err.to_string().contains("initial_ms"));
    }
}
