// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming-logs probe: tail the app's log stream for a bounded window.

use async_trait::async_trait;
use std::time::Duration;
use upcheck_core::CommandSpec;
use upcheck_exec::StreamRunner;

use crate::probe::{transcript_diagnostic, Probe, ProbeOutcome};
use crate::validator::LogValidator;

/// How long one tick holds the tail open. Deliberately shorter than the
/// probe's scheduling interval so a single tick can never block its
/// schedule indefinitely.
pub const DEFAULT_STREAM_DEADLINE: Duration = Duration::from_secs(15);

/// Produces the login preamble plus the long-running tail command.
pub type StreamStepsFn = Box<dyn FnMut() -> (Vec<CommandSpec>, CommandSpec) + Send>;

pub struct StreamingLogs<R: StreamRunner, V: LogValidator> {
    steps: StreamStepsFn,
    deadline: Duration,
    runner: R,
    validator: V,
}

impl<R: StreamRunner, V: LogValidator> StreamingLogs<R, V> {
    pub fn new(steps: StreamStepsFn, runner: R, validator: V) -> Self {
        Self {
            steps,
            deadline: DEFAULT_STREAM_DEADLINE,
            runner,
            validator,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl<R: StreamRunner, V: LogValidator> Probe for StreamingLogs<R, V> {
    fn name(&self) -> &'static str {
        "streaming logs"
    }

    async fn run(&mut self) -> ProbeOutcome {
        let (prefix, tail) = (self.steps)();
        if let Err(err) = self.runner.run_in_sequence(&prefix).await {
            let transcript = self.runner.take_transcript();
            return ProbeOutcome::failed(transcript_diagnostic(&err, &transcript));
        }
        if let Err(err) = self.runner.run_streaming(&tail, self.deadline).await {
            let transcript = self.runner.take_transcript();
            return ProbeOutcome::failed(transcript_diagnostic(&err, &transcript));
        }

        let transcript = self.runner.take_transcript();
        match self.validator.is_newer(&transcript.stdout) {
            Ok(true) => ProbeOutcome::ok(),
            Ok(false) => ProbeOutcome::failed(format!(
                "streamed app logs are not newer than the previous window\nstdout:\n{}\nstderr:\n{}",
                transcript.stdout, transcript.stderr
            )),
            Err(err) => ProbeOutcome::failed(format!(
                "could not validate streamed app logs: {err}\nstdout:\n{}\nstderr:\n{}",
                transcript.stdout, transcript.stderr
            )),
        }
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
