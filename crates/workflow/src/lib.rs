// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The platform workflow collaborator.
//!
//! Given abstract identity parameters (org, space, app name) and a local
//! artifact path, a workflow yields ordered command sequences for setup,
//! deployment, log retrieval, log streaming, and teardown against the
//! target platform. The measurement engine never builds platform CLI
//! invocations itself; everything arrives as `CommandSpec` lists.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod generator;
pub mod platform;
pub mod sample;

pub use generator::CmdGenerator;
pub use platform::{PlatformWorkflow, Workflow};
