// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! App deployability probe: a fresh push-then-delete cycle per tick.

use async_trait::async_trait;
use upcheck_core::CommandSpec;
use upcheck_exec::SequenceRunner;

use crate::probe::{transcript_diagnostic, Probe, ProbeOutcome};

/// Produces the command sequence for one tick. Called fresh each tick so
/// every cycle targets a uniquely named app and cannot collide with a
/// prior tick's leftovers.
pub type StepsFn = Box<dyn FnMut() -> Vec<CommandSpec> + Send>;

pub struct AppDeployability<R: SequenceRunner> {
    steps: StepsFn,
    runner: R,
}

impl<R: SequenceRunner> AppDeployability<R> {
    pub fn new(steps: StepsFn, runner: R) -> Self {
        Self { steps, runner }
    }
}

#[async_trait]
impl<R: SequenceRunner> Probe for AppDeployability<R> {
    fn name(&self) -> &'static str {
        "app deployability"
    }

    async fn run(&mut self) -> ProbeOutcome {
        let steps = (self.steps)();
        match self.runner.run_in_sequence(&steps).await {
            Ok(()) => {
                self.runner.take_transcript();
                ProbeOutcome::ok()
            }
            Err(err) => {
                let transcript = self.runner.take_transcript();
                ProbeOutcome::failed(transcript_diagnostic(&err, &transcript))
            }
        }
    }
}

#[cfg(test)]
#[path = "deploy_tests.rs"]
mod tests;
