// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The probe set and its scheduling machinery.
//!
//! Each probe is one typed periodic health check producing a
//! success/failure verdict plus diagnostic text. The periodic scheduler
//! ticks a probe on a fixed interval, applies the transient-retry policy,
//! and accumulates results into a tally the result aggregator folds into
//! the session verdict.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod deploy;
pub mod http;
pub mod logs;
pub mod periodic;
pub mod probe;
pub mod report;
pub mod stream;
pub mod tally;
pub mod validator;

#[cfg(test)]
mod testutil;

pub use deploy::AppDeployability;
pub use http::HttpAvailability;
pub use logs::RecentLogs;
pub use periodic::{
    no_retry, Periodic, ProbePlan, RetryPredicate, StartMode, MAX_TRANSIENT_RETRIES,
};
pub use probe::{Probe, ProbeOutcome};
pub use report::{aggregate, ProbeVerdict, SessionVerdict};
pub use stream::StreamingLogs;
pub use tally::ResultTally;
pub use validator::{AppLogValidator, LogValidator, ValidateError};
