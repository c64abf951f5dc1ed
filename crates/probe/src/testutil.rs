// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted runner stub shared by probe tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use upcheck_core::CommandSpec;
use upcheck_exec::{ExecError, SequenceRunner, StreamRunner, Transcript};

/// What one runner invocation should produce.
pub struct Script {
    pub result: Result<(), ExecError>,
    pub stdout: String,
    pub stderr: String,
}

impl Script {
    pub fn ok(stdout: &str) -> Self {
        Self {
            result: Ok(()),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn fails(err: ExecError, stderr: &str) -> Self {
        Self {
            result: Err(err),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Records every invocation and replays scripted results, accumulating
/// transcript text the way the buffered runner does.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: VecDeque<Script>,
    pub sequence_calls: Vec<Vec<String>>,
    pub stream_calls: Vec<(String, Duration)>,
    transcript: Transcript,
}

impl ScriptedRunner {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: scripts.into(),
            ..Self::default()
        }
    }

    fn apply_next(&mut self) -> Result<(), ExecError> {
        let script = self.scripts.pop_front().unwrap_or_else(|| Script::ok(""));
        self.transcript.stdout.push_str(&script.stdout);
        self.transcript.stderr.push_str(&script.stderr);
        script.result
    }
}

#[async_trait]
impl SequenceRunner for ScriptedRunner {
    async fn run_in_sequence(&mut self, steps: &[CommandSpec]) -> Result<(), ExecError> {
        self.sequence_calls
            .push(steps.iter().map(CommandSpec::render).collect());
        self.apply_next()
    }

    fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn take_transcript(&mut self) -> Transcript {
        std::mem::take(&mut self.transcript)
    }
}

#[async_trait]
impl StreamRunner for ScriptedRunner {
    async fn run_streaming(
        &mut self,
        step: &CommandSpec,
        timeout: Duration,
    ) -> Result<(), ExecError> {
        self.stream_calls.push((step.render(), timeout));
        self.apply_next()
    }
}

pub fn step_failed(index: usize, command: &str) -> ExecError {
    ExecError::StepFailed {
        index,
        command: command.to_string(),
        exit_code: Some(1),
    }
}
