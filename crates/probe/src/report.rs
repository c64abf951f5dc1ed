// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session verdict aggregation and rendering.

use serde::Serialize;
use std::fmt;

use crate::tally::ResultTally;

/// One probe's slice of the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeVerdict {
    pub name: String,
    pub attempts: u64,
    pub failures: u64,
    pub allowed_failures: u32,
    pub within_budget: bool,
}

/// The single authoritative pass/fail statement for a session. Immutable
/// once computed; written once to the result artifact.
#[derive(Debug, Clone, Serialize)]
pub struct SessionVerdict {
    pub overall_success: bool,
    pub setup_succeeded: bool,
    pub probes: Vec<ProbeVerdict>,
}

/// Fold final tallies and their budgets into the session verdict. Pure:
/// consumes the tallies, touches nothing else.
pub fn aggregate(setup_succeeded: bool, results: Vec<(ResultTally, u32)>) -> SessionVerdict {
    let probes: Vec<ProbeVerdict> = results
        .into_iter()
        .map(|(tally, budget)| ProbeVerdict {
            name: tally.name().to_string(),
            attempts: tally.attempts(),
            failures: tally.failures(),
            allowed_failures: budget,
            within_budget: tally.failures() <= u64::from(budget),
        })
        .collect();

    let overall_success = setup_succeeded && probes.iter().all(|p| p.within_budget);
    SessionVerdict {
        overall_success,
        setup_succeeded,
        probes,
    }
}

impl SessionVerdict {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SessionVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session summary:")?;
        if !self.setup_succeeded {
            writeln!(f, "  setup FAILED, no measurements were taken")?;
        }
        for probe in &self.probes {
            writeln!(
                f,
                "  {}: {}/{} ticks failed (allowed {}) - {}",
                probe.name,
                probe.failures,
                probe.attempts,
                probe.allowed_failures,
                if probe.within_budget { "OK" } else { "FAILED" }
            )?;
        }
        write!(
            f,
            "Overall result: {}",
            if self.overall_success {
                "SUCCESS"
            } else {
                "FAILED"
            }
        )
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
