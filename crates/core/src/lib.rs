// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core types for the upcheck measurement harness: the injectable clock,
//! session configuration, executable command specifications, and the
//! unique-name source used for ephemeral deployment targets.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod clock;
pub mod command;
pub mod config;
pub mod names;

pub use clock::{Clock, FakeClock, SystemClock};
pub use command::CommandSpec;
pub use config::{AllowedFailures, Config, ConfigError, OptionalProbes, Platform};
pub use names::{FixedNames, NameSource, UuidNames};
