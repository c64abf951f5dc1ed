// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The command runner: fail-fast sequences and bounded streaming runs.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;

use upcheck_core::CommandSpec;

use crate::error::ExecError;
use crate::result::{StepResult, StepStatus};

/// Accumulated stdout/stderr text across a sequence.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    pub stdout: String,
    pub stderr: String,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

/// How child output is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Children write straight to this process's stdout/stderr, for live
    /// visibility.
    Inherit,
    /// Output is captured into the in-memory transcript, surfaced on
    /// failure and reset by the caller to bound memory over a session.
    Buffered,
}

/// Seam for anything that can run an ordered command sequence. The
/// orchestrator and probes depend on this trait so tests can inject
/// recording stubs.
#[async_trait]
pub trait SequenceRunner: Send {
    /// Run each step in order; the first step that fails to start or
    /// exits non-zero aborts the sequence. Steps after it do not run.
    async fn run_in_sequence(&mut self, steps: &[CommandSpec]) -> Result<(), ExecError>;

    /// Captured transcript since the last reset (empty in inherit mode).
    fn transcript(&self) -> &Transcript;

    /// Take and reset the captured transcript.
    fn take_transcript(&mut self) -> Transcript;
}

/// Runners that can additionally hold one long-running command open for
/// a bounded time, collecting its output.
#[async_trait]
pub trait StreamRunner: SequenceRunner {
    /// Run `step`, collecting output until `timeout` fires, then kill and
    /// reap the child. Hitting the timeout is the normal way for a
    /// log-tail command to end, not an error.
    async fn run_streaming(
        &mut self,
        step: &CommandSpec,
        timeout: Duration,
    ) -> Result<(), ExecError>;
}

/// Spawns real OS processes and fully reaps each before proceeding.
pub struct CmdRunner {
    mode: OutputMode,
    transcript: Transcript,
}

impl CmdRunner {
    /// Runner whose children write live to this process's own stdio.
    pub fn inherited() -> Self {
        Self {
            mode: OutputMode::Inherit,
            transcript: Transcript::default(),
        }
    }

    /// Runner that captures all child output into a transcript.
    pub fn buffered() -> Self {
        Self {
            mode: OutputMode::Buffered,
            transcript: Transcript::default(),
        }
    }

    fn command_for(&self, step: &CommandSpec, capture: bool) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(step.program());
        command.args(step.argv());
        if let Some(dir) = step.working_dir() {
            command.current_dir(dir);
        }
        for (key, value) in step.env_overrides() {
            command.env(key, value);
        }
        command.stdin(Stdio::null());
        if capture {
            command.stdout(Stdio::piped());
            command.stderr(Stdio::piped());
        } else {
            command.stdout(Stdio::inherit());
            command.stderr(Stdio::inherit());
        }
        command.kill_on_drop(true);
        command
    }

    async fn run_step(&mut self, index: usize, step: &CommandSpec) -> Result<StepResult, ExecError> {
        let start = Instant::now();
        let capture = self.mode == OutputMode::Buffered;

        let step_span = tracing::info_span!(
            "exec.step",
            index,
            command = %step.render(),
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let child = self
            .command_for(step, capture)
            .spawn()
            .map_err(|source| ExecError::SpawnFailed {
                index,
                command: step.render(),
                source,
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| ExecError::SpawnFailed {
                index,
                command: step.render(),
                source,
            })?;

        let duration = start.elapsed();
        let status = match output.status.code() {
            Some(code) => StepStatus::Exited(code),
            None => StepStatus::Signalled,
        };
        step_span.record("exit_code", status.exit_code().unwrap_or(-1));
        step_span.record("duration_ms", duration.as_millis() as u64);

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if capture {
            self.transcript.stdout.push_str(&stdout);
            self.transcript.stderr.push_str(&stderr);
        }

        Ok(StepResult {
            command: step.render(),
            status,
            stdout,
            stderr,
            duration,
        })
    }
}

#[async_trait]
impl SequenceRunner for CmdRunner {
    async fn run_in_sequence(&mut self, steps: &[CommandSpec]) -> Result<(), ExecError> {
        for (index, step) in steps.iter().enumerate() {
            let result = self.run_step(index, step).await?;
            if !result.status.success() {
                return Err(ExecError::StepFailed {
                    index,
                    command: result.command,
                    exit_code: result.status.exit_code(),
                });
            }
        }
        Ok(())
    }

    fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn take_transcript(&mut self) -> Transcript {
        std::mem::take(&mut self.transcript)
    }
}

#[async_trait]
impl StreamRunner for CmdRunner {
    async fn run_streaming(
        &mut self,
        step: &CommandSpec,
        timeout: Duration,
    ) -> Result<(), ExecError> {
        // Streaming output is always captured; it is the payload the
        // caller wants to validate.
        let mut child = self
            .command_for(step, true)
            .spawn()
            .map_err(|source| ExecError::SpawnFailed {
                index: 0,
                command: step.render(),
                source,
            })?;

        let stdout_task = child.stdout.take().map(|mut reader| {
            tokio::spawn(async move {
                let mut text = String::new();
                let _ = reader.read_to_string(&mut text).await;
                text
            })
        });
        let stderr_task = child.stderr.take().map(|mut reader| {
            tokio::spawn(async move {
                let mut text = String::new();
                let _ = reader.read_to_string(&mut text).await;
                text
            })
        });

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            // Ran out its clock: kill and reap, the expected ending.
            Err(_) => {
                let _ = child.kill().await;
                None
            }
            Ok(Ok(status)) => Some(status),
            Ok(Err(source)) => {
                return Err(ExecError::SpawnFailed {
                    index: 0,
                    command: step.render(),
                    source,
                })
            }
        };

        // The readers finish once the child's pipes close.
        if let Some(task) = stdout_task {
            let text = task.await.unwrap_or_default();
            self.transcript.stdout.push_str(&text);
        }
        if let Some(task) = stderr_task {
            let text = task.await.unwrap_or_default();
            self.transcript.stderr.push_str(&text);
        }

        match status {
            Some(status) if !status.success() => Err(ExecError::StepFailed {
                index: 0,
                command: step.render(),
                exit_code: status.code(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
