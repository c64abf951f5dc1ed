// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The probe seam.

use async_trait::async_trait;
use upcheck_exec::{ExecError, Transcript};

/// Result of one probe invocation. Stateless value with no identity.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub success: bool,
    /// Human-readable failure detail, including the command transcript
    /// where one exists. Empty on success.
    pub diagnostic: String,
}

impl ProbeOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            diagnostic: String::new(),
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostic: diagnostic.into(),
        }
    }
}

/// One typed periodic health check.
#[async_trait]
pub trait Probe: Send {
    fn name(&self) -> &'static str;

    /// One tick's worth of work. Never panics; failures are reported in
    /// the outcome.
    async fn run(&mut self) -> ProbeOutcome;
}

/// Failure diagnostic for command-backed probes: the sequence error plus
/// the full captured transcript.
pub(crate) fn transcript_diagnostic(err: &ExecError, transcript: &Transcript) -> String {
    format!(
        "{err}\nstdout:\n{}\nstderr:\n{}",
        transcript.stdout, transcript.stderr
    )
}
