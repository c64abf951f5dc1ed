// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic probe scheduling with transient-failure retry.
//!
//! One scheduling task per probe: tick, wait one interval, tick again,
//! until the session's stop signal arrives. Ticks within one schedule are
//! strictly sequential; a tick in flight always resolves (including its
//! retries) before the stop signal is honored, and no new tick starts
//! after it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use upcheck_core::Clock;

use crate::probe::Probe;
use crate::tally::ResultTally;

/// Heuristic classifying a failure diagnostic as transient. Transient
/// failures are re-run immediately and never charged to the budget. This
/// is substring matching over captured text because the platform CLI
/// exposes no structured error code.
pub type RetryPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Re-runs allowed per tick before a transient condition is treated as a
/// real failure. Bounded so a permanently broken transient condition
/// cannot livelock a schedule.
pub const MAX_TRANSIENT_RETRIES: u32 = 3;

/// A predicate that never retries.
pub fn no_retry() -> RetryPredicate {
    Arc::new(|_| false)
}

/// When the first tick fires relative to session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// First tick at time zero.
    Immediate,
    /// First tick after one full interval, for probes whose target needs
    /// setup time to produce observable state.
    AfterFirstInterval,
}

/// A probe bound to its schedule.
pub struct Periodic<P: Probe, C: Clock> {
    probe: P,
    clock: C,
    interval: Duration,
    start: StartMode,
    retry: RetryPredicate,
    tally: ResultTally,
}

impl<P: Probe, C: Clock> Periodic<P, C> {
    pub fn new(
        probe: P,
        clock: C,
        interval: Duration,
        start: StartMode,
        retry: RetryPredicate,
    ) -> Self {
        let tally = ResultTally::new(probe.name());
        Self {
            probe,
            clock,
            interval,
            start,
            retry,
            tally,
        }
    }

    /// Drive the probe until `stop` fires; returns the final tally.
    pub async fn run(mut self, stop: CancellationToken) -> ResultTally {
        if self.start == StartMode::AfterFirstInterval {
            tokio::select! {
                biased;
                _ = stop.cancelled() => return self.tally,
                _ = self.clock.sleep(self.interval) => {}
            }
        }

        loop {
            self.tick().await;
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = self.clock.sleep(self.interval) => {}
            }
        }

        self.tally
    }

    async fn tick(&mut self) {
        let mut retries = 0;
        loop {
            let outcome = self.probe.run().await;
            if outcome.success {
                self.tally.record_success();
                return;
            }
            if (self.retry)(&outcome.diagnostic) && retries < MAX_TRANSIENT_RETRIES {
                retries += 1;
                tracing::info!(
                    probe = self.probe.name(),
                    retries,
                    "transient failure, re-running: {}",
                    outcome.diagnostic
                );
                continue;
            }
            // Logged now, not at session end, so the failure is visible
            // while the session is still running.
            tracing::error!(
                probe = self.probe.name(),
                "probe failed: {}",
                outcome.diagnostic
            );
            self.tally.record_failure(self.clock.epoch_ms());
            return;
        }
    }
}

impl<P, C> Periodic<P, C>
where
    P: Probe + 'static,
    C: Clock + 'static,
{
    /// Erase the probe type and pair the schedule with its failure
    /// budget, ready for the orchestrator to launch.
    pub fn plan(self, budget: u32) -> ProbePlan {
        let name = self.probe.name();
        ProbePlan {
            name,
            budget,
            launch: Box::new(move |stop| tokio::spawn(self.run(stop))),
        }
    }
}

type LaunchFn = Box<dyn FnOnce(CancellationToken) -> JoinHandle<ResultTally> + Send>;

/// A schedule whose concrete probe type has been erased.
pub struct ProbePlan {
    name: &'static str,
    budget: u32,
    launch: LaunchFn,
}

impl ProbePlan {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Start the scheduling task. The handle resolves to the final tally
    /// once `stop` fires and the in-flight tick (if any) completes.
    pub fn launch(self, stop: CancellationToken) -> JoinHandle<ResultTally> {
        (self.launch)(stop)
    }

    /// A plan from any scheduling future; lets tests and custom
    /// schedules bypass `Periodic`.
    pub fn from_task<F, Fut>(name: &'static str, budget: u32, task: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ResultTally> + Send + 'static,
    {
        Self {
            name,
            budget,
            launch: Box::new(move |stop| tokio::spawn(task(stop))),
        }
    }
}

#[cfg(test)]
#[path = "periodic_tests.rs"]
mod tests;
