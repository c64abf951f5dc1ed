// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The measurement engine.
//!
//! The orchestrator drives one session through its states: set up the
//! platform workflows, run every probe schedule concurrently for the
//! configured duration, aggregate the tallies into a verdict, then tear
//! everything down best-effort. The session module wires a configured
//! session together from the config file: temp homes, staged sample
//! apps, workflows, and probe schedules.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod orchestrator;
pub mod session;

pub use orchestrator::{Orchestrator, OrchestratorError, WorkflowActions};
pub use session::{Session, SessionError, SessionOptions};
