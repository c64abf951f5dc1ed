// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log-retrieval probes: recent logs and the syslog drain check.

use async_trait::async_trait;
use upcheck_exec::SequenceRunner;

use crate::deploy::StepsFn;
use crate::probe::{transcript_diagnostic, Probe, ProbeOutcome};
use crate::validator::LogValidator;

/// Fetches logs via a command sequence and hands the captured output to
/// the app-log validator. The syslog-drain variant has the same shape but
/// reads the sink app that receives forwarded logs.
pub struct RecentLogs<R: SequenceRunner, V: LogValidator> {
    name: &'static str,
    steps: StepsFn,
    runner: R,
    validator: V,
}

impl<R: SequenceRunner, V: LogValidator> RecentLogs<R, V> {
    pub fn new(steps: StepsFn, runner: R, validator: V) -> Self {
        Self {
            name: "recent logs",
            steps,
            runner,
            validator,
        }
    }

    pub fn syslog_drain(steps: StepsFn, runner: R, validator: V) -> Self {
        Self {
            name: "app syslog availability",
            steps,
            runner,
            validator,
        }
    }
}

#[async_trait]
impl<R: SequenceRunner, V: LogValidator> Probe for RecentLogs<R, V> {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&mut self) -> ProbeOutcome {
        let steps = (self.steps)();
        if let Err(err) = self.runner.run_in_sequence(&steps).await {
            let transcript = self.runner.take_transcript();
            return ProbeOutcome::failed(transcript_diagnostic(&err, &transcript));
        }

        let transcript = self.runner.take_transcript();
        match self.validator.is_newer(&transcript.stdout) {
            Ok(true) => ProbeOutcome::ok(),
            Ok(false) => ProbeOutcome::failed(format!(
                "fetched app logs are not newer than the previous fetch\nstdout:\n{}\nstderr:\n{}",
                transcript.stdout, transcript.stderr
            )),
            Err(err) => ProbeOutcome::failed(format!(
                "could not validate fetched app logs: {err}\nstdout:\n{}\nstderr:\n{}",
                transcript.stdout, transcript.stderr
            )),
        }
    }
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
