// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution error types.

use thiserror::Error;

/// Errors that abort a command sequence. The step index identifies how
/// far the sequence got; steps after it never ran.
#[derive(Debug, Error)]
pub enum ExecError {
    /// A step ran but exited non-zero or was killed by a signal.
    #[error("step {index} `{command}` {}", exit_text(.exit_code))]
    StepFailed {
        index: usize,
        command: String,
        /// `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
    },

    /// A step could not be started at all.
    #[error("failed to spawn step {index} `{command}`: {source}")]
    SpawnFailed {
        index: usize,
        command: String,
        source: std::io::Error,
    },
}

impl ExecError {
    /// Index of the step that aborted the sequence.
    pub fn step_index(&self) -> usize {
        match self {
            ExecError::StepFailed { index, .. } | ExecError::SpawnFailed { index, .. } => *index,
        }
    }
}

fn exit_text(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
