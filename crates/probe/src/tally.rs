// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-probe result tallies.

/// Attempt/failure counters for one scheduled probe. Exactly one tally
/// exists per probe and it is mutated only by that probe's scheduling
/// task, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct ResultTally {
    name: String,
    attempts: u64,
    failures: u64,
    first_failure_epoch_ms: Option<u64>,
}

impl ResultTally {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attempts: 0,
            failures: 0,
            first_failure_epoch_ms: None,
        }
    }

    pub fn record_success(&mut self) {
        self.attempts += 1;
    }

    pub fn record_failure(&mut self, epoch_ms: u64) {
        self.attempts += 1;
        self.failures += 1;
        self.first_failure_epoch_ms.get_or_insert(epoch_ms);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn first_failure_epoch_ms(&self) -> Option<u64> {
        self.first_failure_epoch_ms
    }
}

#[cfg(test)]
#[path = "tally_tests.rs"]
mod tests;
