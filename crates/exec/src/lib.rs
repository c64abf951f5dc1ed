// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered command-sequence execution with transcript capture.
//!
//! The executor runs [`upcheck_core::CommandSpec`] sequences, aborting on
//! the first step that fails to start or exits non-zero. Output is either
//! streamed live to this process's own stdio or captured into an
//! in-memory transcript surfaced on failure.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod result;
pub mod runner;

pub use error::ExecError;
pub use result::{StepResult, StepStatus};
pub use runner::{CmdRunner, OutputMode, SequenceRunner, StreamRunner, Transcript};
