// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! App-log freshness validation.
//!
//! The sample app prints its unix epoch on a heartbeat, so its platform
//! log stream carries lines like
//! `2026-08-23T10:00:01.00+0000 [APP/PROC/WEB/0] OUT 1787824801`.
//! A log fetch is healthy when the newest such line has advanced past
//! the one seen on the previous fetch. This is a best-effort heuristic
//! over captured text; the platform CLI exposes no structured signal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("no app epoch line found in log output")]
    NoEpochLine,

    #[error("could not parse app epoch from line `{line}`")]
    BadEpoch { line: String },
}

/// Inspects captured log text and reports whether it shows fresh app
/// output. Stateful: implementations remember the previous fetch.
pub trait LogValidator: Send {
    fn is_newer(&mut self, output: &str) -> Result<bool, ValidateError>;
}

/// Default validator keyed on the sample app's epoch heartbeat.
#[derive(Debug, Default)]
pub struct AppLogValidator {
    last_epoch: Option<i64>,
}

impl AppLogValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogValidator for AppLogValidator {
    fn is_newer(&mut self, output: &str) -> Result<bool, ValidateError> {
        // Scan from the end: the newest app line decides.
        for line in output.lines().rev() {
            if !line.contains("[APP") {
                continue;
            }
            let raw = line
                .split_whitespace()
                .last()
                .ok_or(ValidateError::NoEpochLine)?;
            let epoch: i64 = raw.parse().map_err(|_| ValidateError::BadEpoch {
                line: line.to_string(),
            })?;
            let newer = match self.last_epoch {
                None => true,
                Some(previous) => epoch > previous,
            };
            if newer {
                self.last_epoch = Some(epoch);
            }
            return Ok(newer);
        }
        Err(ValidateError::NoEpochLine)
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
