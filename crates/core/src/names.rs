// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unique-name source for ephemeral deployment targets.
//!
//! Orgs, spaces, and per-tick apps all need names that cannot collide
//! with earlier ticks or concurrent sessions. The source is injected so
//! tests get deterministic names.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub trait NameSource: Send + Sync {
    /// A new name guaranteed unique within the session, e.g.
    /// `upcheck-app-5a1e…`.
    fn unique(&self, prefix: &str) -> String;
}

/// Production source backed by v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNames;

impl NameSource for UuidNames {
    fn unique(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

/// Deterministic counter-based source for tests.
#[derive(Debug, Default)]
pub struct FixedNames {
    counter: AtomicU64,
}

impl FixedNames {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameSource for FixedNames {
    fn unique(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
