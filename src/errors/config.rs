// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating executor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension maps to no known config format.
    #[error("unsupported config format for {path}; expected .yaml, .yml or .toml")]
    UnsupportedFormat { path: PathBuf },

    /// The config parsed but failed validation.
    #[error("configuration validation failed:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}
