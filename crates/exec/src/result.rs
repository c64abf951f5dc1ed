// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-step execution records.

use std::time::Duration;

/// Record of a single executed step, owned by the invocation that
/// produced it and handed to the caller on completion.
#[derive(Debug)]
pub struct StepResult {
    /// Rendered command line.
    pub command: String,
    pub status: StepStatus,
    /// Captured stdout (empty in inherit mode).
    pub stdout: String,
    /// Captured stderr (empty in inherit mode).
    pub stderr: String,
    /// Wall-clock duration.
    pub duration: Duration,
}

/// Exit disposition of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Exited(i32),
    Signalled,
}

impl StepStatus {
    pub fn success(&self) -> bool {
        matches!(self, StepStatus::Exited(0))
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            StepStatus::Exited(code) => Some(*code),
            StepStatus::Signalled => None,
        }
    }
}
