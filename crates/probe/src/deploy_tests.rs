// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::testutil::{step_failed, Script, ScriptedRunner};
use std::sync::Arc;
use upcheck_core::{FixedNames, NameSource};

fn push_then_delete(names: Arc<FixedNames>) -> StepsFn {
    Box::new(move || {
        let app = names.unique("app");
        vec![
            CommandSpec::new("cf").args(["push", app.as_str()]),
            CommandSpec::new("cf").args(["delete", app.as_str(), "-f"]),
        ]
    })
}

#[tokio::test]
async fn a_clean_cycle_succeeds_and_clears_the_transcript() {
    let runner = ScriptedRunner::new(vec![Script::ok("pushing...\ndone\n")]);
    let mut probe = AppDeployability::new(push_then_delete(Arc::default()), runner);

    let outcome = probe.run().await;
    assert!(outcome.success);
    // Transcript was drained so it cannot grow across the session.
    assert!(probe.runner.transcript().is_empty());
}

#[tokio::test]
async fn each_tick_builds_a_fresh_uniquely_named_sequence() {
    let runner = ScriptedRunner::new(vec![Script::ok(""), Script::ok("")]);
    let mut probe = AppDeployability::new(push_then_delete(Arc::default()), runner);

    probe.run().await;
    probe.run().await;

    let calls = &probe.runner.sequence_calls;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0][0], "cf push app-1");
    assert_eq!(calls[1][0], "cf push app-2");
}

#[tokio::test]
async fn a_failed_sequence_reports_the_error_and_transcript() {
    let runner = ScriptedRunner::new(vec![Script::fails(
        step_failed(0, "cf push app-1"),
        "buildpack compile failed",
    )]);
    let mut probe = AppDeployability::new(push_then_delete(Arc::default()), runner);

    let outcome = probe.run().await;
    assert!(!outcome.success);
    assert!(outcome.diagnostic.contains("cf push app-1"));
    assert!(outcome.diagnostic.contains("buildpack compile failed"));
}
