// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use upcheck_core::SystemClock;
use upcheck_exec::{ExecError, Transcript};

/// Records every sequence it is asked to run; a scripted `true` makes
/// that call fail.
struct StubRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    script: VecDeque<bool>,
    transcript: Transcript,
}

impl StubRunner {
    fn new() -> Self {
        Self::with_script(vec![])
    }

    fn with_script(script: Vec<bool>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            script: script.into(),
            transcript: Transcript::default(),
        }
    }

    fn calls(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl SequenceRunner for StubRunner {
    async fn run_in_sequence(&mut self, steps: &[CommandSpec]) -> Result<(), ExecError> {
        self.calls
            .lock()
            .push(steps.iter().map(CommandSpec::render).collect());
        if self.script.pop_front().unwrap_or(false) {
            self.transcript.stdout.push_str("boom\n");
            return Err(ExecError::StepFailed {
                index: 0,
                command: steps.first().map(CommandSpec::render).unwrap_or_default(),
                exit_code: Some(1),
            });
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

fn actions(label: &str) -> WorkflowActions {
    WorkflowActions {
        label: label.into(),
        setup: vec![CommandSpec::new(format!("setup-{label}"))],
        teardown: vec![CommandSpec::new(format!("teardown-{label}"))],
    }
}

fn clean_plan(name: &'static str, budget: u32) -> ProbePlan {
    ProbePlan::from_task(name, budget, move |stop| async move {
        let mut tally = ResultTally::new(name);
        tally.record_success();
        stop.cancelled().await;
        tally
    })
}

#[tokio::test(start_paused = true)]
async fn a_clean_session_measures_writes_the_artifact_and_tears_down() {
    let setup = StubRunner::new();
    let teardown = StubRunner::new();
    let setup_calls = setup.calls();
    let teardown_calls = teardown.calls();

    let mut orc = Orchestrator::new(SystemClock, setup, teardown, Duration::from_secs(5));
    orc.add_workflow(actions("main"));
    orc.add_probe(clean_plan("HTTP availability", 1));

    let dir = tempfile::tempdir().unwrap();
    let result_path = dir.path().join("result.json");
    orc.set_result_file(result_path.clone());

    let verdict = orc.run().await.unwrap();
    assert!(verdict.overall_success);
    assert!(verdict.setup_succeeded);
    assert_eq!(verdict.probes.len(), 1);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&result_path).unwrap()).unwrap();
    assert_eq!(json["probes"][0]["name"], "HTTP availability");
    assert_eq!(json["overall_success"], true);

    assert_eq!(setup_calls.lock().as_slice(), [["setup-main"]]);
    assert_eq!(teardown_calls.lock().as_slice(), [["teardown-main"]]);
}

#[tokio::test(start_paused = true)]
async fn a_setup_failure_skips_measurement_but_still_tears_everything_down() {
    let setup = StubRunner::with_script(vec![true]);
    let teardown = StubRunner::new();
    let setup_calls = setup.calls();
    let teardown_calls = teardown.calls();

    let launched = Arc::new(AtomicBool::new(false));
    let launched_flag = Arc::clone(&launched);

    let mut orc = Orchestrator::new(SystemClock, setup, teardown, Duration::from_secs(5));
    orc.add_workflow(actions("main"));
    orc.add_workflow(actions("sink"));
    orc.add_probe(ProbePlan::from_task("recent logs", 0, move |_stop| async move {
        launched_flag.store(true, Ordering::Relaxed);
        ResultTally::new("recent logs")
    }));

    let verdict = orc.run().await.unwrap();
    assert!(!verdict.overall_success);
    assert!(!verdict.setup_succeeded);
    assert!(verdict.probes.is_empty());
    assert!(!launched.load(Ordering::Relaxed));

    // The second workflow's setup was still attempted, and both
    // teardowns ran.
    assert_eq!(setup_calls.lock().len(), 2);
    assert_eq!(
        teardown_calls.lock().as_slice(),
        [["teardown-main"], ["teardown-sink"]]
    );
}

#[tokio::test(start_paused = true)]
async fn a_failed_teardown_never_stops_the_remaining_teardowns() {
    let teardown = StubRunner::with_script(vec![true]);
    let teardown_calls = teardown.calls();

    let mut orc = Orchestrator::new(SystemClock, StubRunner::new(), teardown, Duration::from_secs(1));
    orc.add_workflow(actions("main"));
    orc.add_workflow(actions("push"));
    orc.add_workflow(actions("sink"));

    let verdict = orc.run().await.unwrap();
    assert!(verdict.overall_success);
    assert_eq!(
        teardown_calls.lock().as_slice(),
        [["teardown-main"], ["teardown-push"], ["teardown-sink"]]
    );
}

#[tokio::test(start_paused = true)]
async fn a_dead_scheduling_task_forces_the_session_to_fail() {
    let mut orc = Orchestrator::new(
        SystemClock,
        StubRunner::new(),
        StubRunner::new(),
        Duration::from_secs(1),
    );
    orc.add_workflow(actions("main"));
    orc.add_probe(clean_plan("HTTP availability", 0));
    orc.add_probe(ProbePlan::from_task("recent logs", 0, |_stop| async {
        let tally = ResultTally::new("recent logs");
        if tally.attempts() == 0 {
            panic!("scheduler bug");
        }
        tally
    }));

    let verdict = orc.run().await.unwrap();
    assert!(!verdict.overall_success);
    assert!(verdict.setup_succeeded);
    // The surviving schedule still contributed its tally.
    assert_eq!(verdict.probes.len(), 1);
    assert_eq!(verdict.probes[0].name, "HTTP availability");
}

#[tokio::test(start_paused = true)]
async fn a_result_file_error_surfaces_only_after_teardown() {
    let teardown = StubRunner::new();
    let teardown_calls = teardown.calls();

    let mut orc = Orchestrator::new(SystemClock, StubRunner::new(), teardown, Duration::from_secs(1));
    orc.add_workflow(actions("main"));
    orc.set_result_file(PathBuf::from("/nonexistent-dir/result.json"));

    let err = orc.run().await.unwrap_err();
    assert!(matches!(err, OrchestratorError::WriteResult { .. }));
    assert_eq!(teardown_calls.lock().as_slice(), [["teardown-main"]]);
}
