// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session configuration: target platform credentials, session duration,
//! per-probe failure budgets, and optional-probe toggles.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a config file. All of them
/// are fatal before any measurement begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file `{path}`: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid config: `{field}` must not be empty")]
    MissingField { field: &'static str },

    #[error("invalid config: `duration_secs` must be greater than zero")]
    ZeroDuration,
}

/// Top-level session configuration, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub platform: Platform,
    pub duration_secs: u64,
    #[serde(default)]
    pub allowed_failures: AllowedFailures,
    #[serde(default)]
    pub optional_probes: OptionalProbes,
}

/// Target platform endpoint and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct Platform {
    pub api: String,
    pub admin_user: String,
    pub admin_password: String,
    /// Domain under which pushed apps receive routes.
    pub app_domain: String,
}

/// Per-probe failed-tick budgets; a probe staying at or under its budget
/// keeps the session green.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct AllowedFailures {
    pub http_availability: u32,
    pub app_deployability: u32,
    pub recent_logs: u32,
    pub streaming_logs: u32,
    pub app_syslog_availability: u32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct OptionalProbes {
    pub run_app_syslog_availability: bool,
}

impl Config {
    /// Read, parse, and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("platform.api", &self.platform.api),
            ("platform.admin_user", &self.platform.admin_user),
            ("platform.admin_password", &self.platform.admin_password),
            ("platform.app_domain", &self.platform.app_domain),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ConfigError::MissingField { field });
            }
        }
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }

    pub fn session_duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
