// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn successes_only_move_attempts() {
    let mut tally = ResultTally::new("recent logs");
    tally.record_success();
    tally.record_success();
    assert_eq!(tally.attempts(), 2);
    assert_eq!(tally.failures(), 0);
    assert!(tally.first_failure_epoch_ms().is_none());
}

#[test]
fn failures_move_both_counters() {
    let mut tally = ResultTally::new("recent logs");
    tally.record_success();
    tally.record_failure(1_000);
    assert_eq!(tally.attempts(), 2);
    assert_eq!(tally.failures(), 1);
}

#[test]
fn failures_never_exceed_attempts() {
    let mut tally = ResultTally::new("recent logs");
    for i in 0..50 {
        if i % 3 == 0 {
            tally.record_failure(i);
        } else {
            tally.record_success();
        }
        assert!(tally.failures() <= tally.attempts());
    }
}

#[test]
fn only_the_first_failure_timestamp_is_kept() {
    let mut tally = ResultTally::new("recent logs");
    tally.record_failure(1_000);
    tally.record_failure(2_000);
    assert_eq!(tally.first_failure_epoch_ms(), Some(1_000));
}
