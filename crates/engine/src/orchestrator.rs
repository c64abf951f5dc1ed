// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session orchestration: Setup, Running, Aggregating, TearingDown.
//!
//! Setup failures never panic the session and never skip teardown; they
//! force the verdict to failure and the session proceeds straight to
//! cleanup. Teardown is best-effort: every workflow's teardown runs even
//! when an earlier one fails.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use upcheck_core::{Clock, CommandSpec};
use upcheck_exec::SequenceRunner;
use upcheck_probe::{aggregate, ProbePlan, ResultTally, SessionVerdict};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("failed to encode result file: {source}")]
    EncodeResult { source: serde_json::Error },

    #[error("failed to write result file `{path}`: {source}")]
    WriteResult { path: String, source: io::Error },
}

/// One workflow's contribution to session setup and teardown.
pub struct WorkflowActions {
    pub label: String,
    pub setup: Vec<CommandSpec>,
    pub teardown: Vec<CommandSpec>,
}

/// Drives one measurement session end to end. Setup and teardown use
/// separate runners: setup output is buffered so failures can be logged
/// with their transcript, teardown output streams through for live
/// visibility.
pub struct Orchestrator<S: SequenceRunner, T: SequenceRunner, C: Clock> {
    clock: C,
    setup_runner: S,
    teardown_runner: T,
    session: Duration,
    workflows: Vec<WorkflowActions>,
    plans: Vec<ProbePlan>,
    result_path: Option<PathBuf>,
}

impl<S: SequenceRunner, T: SequenceRunner, C: Clock> Orchestrator<S, T, C> {
    pub fn new(clock: C, setup_runner: S, teardown_runner: T, session: Duration) -> Self {
        Self {
            clock,
            setup_runner,
            teardown_runner,
            session,
            workflows: Vec::new(),
            plans: Vec::new(),
            result_path: None,
        }
    }

    pub fn add_workflow(&mut self, actions: WorkflowActions) {
        self.workflows.push(actions);
    }

    pub fn add_probe(&mut self, plan: ProbePlan) {
        self.plans.push(plan);
    }

    pub fn set_result_file(&mut self, path: PathBuf) {
        self.result_path = Some(path);
    }

    pub fn probe_names(&self) -> Vec<&'static str> {
        self.plans.iter().map(|plan| plan.name()).collect()
    }

    /// Run the session to completion and return the verdict. A result
    /// file error is deferred until after teardown so cleanup always
    /// happens.
    pub async fn run(mut self) -> Result<SessionVerdict, OrchestratorError> {
        let setup_ok = self.set_up().await;

        let (results, schedulers_ok) = if setup_ok {
            self.measure().await
        } else {
            (Vec::new(), true)
        };

        let mut verdict = aggregate(setup_ok, results);
        if !schedulers_ok {
            verdict.overall_success = false;
        }
        tracing::info!("{verdict}");

        let pending = self.write_result(&verdict).err();

        self.tear_down().await;

        match pending {
            Some(err) => Err(err),
            None => Ok(verdict),
        }
    }

    async fn set_up(&mut self) -> bool {
        let mut setup_ok = true;
        for actions in &self.workflows {
            if actions.setup.is_empty() {
                continue;
            }
            tracing::info!(workflow = %actions.label, "setting up");
            match self.setup_runner.run_in_sequence(&actions.setup).await {
                Ok(()) => {
                    self.setup_runner.take_transcript();
                }
                Err(err) => {
                    let transcript = self.setup_runner.take_transcript();
                    tracing::error!(
                        workflow = %actions.label,
                        "setup failed: {err}\nstdout:\n{}\nstderr:\n{}",
                        transcript.stdout,
                        transcript.stderr
                    );
                    setup_ok = false;
                }
            }
        }
        setup_ok
    }

    /// Launch every probe schedule, sleep out the session, stop them,
    /// and collect the final tallies. Returns false in the flag if any
    /// scheduling task died instead of returning its tally.
    async fn measure(&mut self) -> (Vec<(ResultTally, u32)>, bool) {
        let stop = CancellationToken::new();
        let running: Vec<_> = self
            .plans
            .drain(..)
            .map(|plan| {
                let name = plan.name();
                let budget = plan.budget();
                tracing::info!(probe = name, "starting measurement");
                (name, budget, plan.launch(stop.child_token()))
            })
            .collect();

        self.clock.sleep(self.session).await;
        stop.cancel();

        let mut results = Vec::with_capacity(running.len());
        let mut schedulers_ok = true;
        for (name, budget, handle) in running {
            match handle.await {
                Ok(tally) => results.push((tally, budget)),
                Err(err) => {
                    tracing::error!(probe = name, "scheduling task died: {err}");
                    schedulers_ok = false;
                }
            }
        }
        (results, schedulers_ok)
    }

    fn write_result(&self, verdict: &SessionVerdict) -> Result<(), OrchestratorError> {
        let Some(path) = &self.result_path else {
            return Ok(());
        };
        let json = verdict
            .to_json()
            .map_err(|source| OrchestratorError::EncodeResult { source })?;
        std::fs::write(path, json).map_err(|source| OrchestratorError::WriteResult {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote result file");
        Ok(())
    }

    async fn tear_down(&mut self) {
        for actions in &self.workflows {
            if actions.teardown.is_empty() {
                continue;
            }
            tracing::info!(workflow = %actions.label, "tearing down");
            if let Err(err) = self.teardown_runner.run_in_sequence(&actions.teardown).await {
                tracing::error!(workflow = %actions.label, "teardown failed: {err}");
            }
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
