// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform CLI command generation.
//!
//! Every command runs with `CF_HOME` pointed at the owning actor's temp
//! dir, so login state never leaks between the orchestrator and the
//! per-probe runners. Credentials go through `CF_USERNAME`/`CF_PASSWORD`
//! environment overrides; the argument vector stays log-safe.

use std::path::{Path, PathBuf};

use upcheck_core::CommandSpec;

/// Builds `cf` invocations bound to one `CF_HOME`.
#[derive(Debug, Clone)]
pub struct CmdGenerator {
    cf_home: PathBuf,
}

impl CmdGenerator {
    pub fn new(cf_home: impl Into<PathBuf>) -> Self {
        Self {
            cf_home: cf_home.into(),
        }
    }

    pub fn cf_home(&self) -> &Path {
        &self.cf_home
    }

    fn cf(&self) -> CommandSpec {
        CommandSpec::new("cf").env("CF_HOME", self.cf_home.display().to_string())
    }

    pub fn api(&self, url: &str) -> CommandSpec {
        self.cf().args(["api", url, "--skip-ssl-validation"])
    }

    /// `cf auth` with no positional credentials; the CLI reads them from
    /// the environment overrides.
    pub fn auth(&self, user: &str, password: &str) -> CommandSpec {
        self.cf()
            .arg("auth")
            .env("CF_USERNAME", user)
            .env("CF_PASSWORD", password)
    }

    pub fn create_org(&self, org: &str) -> CommandSpec {
        self.cf().args(["create-org", org])
    }

    pub fn create_space(&self, org: &str, space: &str) -> CommandSpec {
        self.cf().args(["create-space", space, "-o", org])
    }

    pub fn target(&self, org: &str, space: &str) -> CommandSpec {
        self.cf().args(["target", "-o", org, "-s", space])
    }

    pub fn push(&self, app: &str, dir: &Path) -> CommandSpec {
        self.cf()
            .args(["push", app, "-p"])
            .arg(dir.display().to_string())
    }

    pub fn delete(&self, app: &str) -> CommandSpec {
        self.cf().args(["delete", app, "-f", "-r"])
    }

    pub fn delete_org(&self, org: &str) -> CommandSpec {
        self.cf().args(["delete-org", org, "-f"])
    }

    pub fn logout(&self) -> CommandSpec {
        self.cf().arg("logout")
    }

    pub fn recent_logs(&self, app: &str) -> CommandSpec {
        self.cf().args(["logs", app, "--recent"])
    }

    pub fn stream_logs(&self, app: &str) -> CommandSpec {
        self.cf().args(["logs", app])
    }

    pub fn map_route(&self, app: &str, domain: &str, hostname: &str) -> CommandSpec {
        self.cf()
            .args(["map-route", app, domain, "--hostname", hostname])
    }

    pub fn create_user_provided_service(&self, service: &str, syslog_url: &str) -> CommandSpec {
        self.cf()
            .args(["create-user-provided-service", service, "-l", syslog_url])
    }

    pub fn bind_service(&self, app: &str, service: &str) -> CommandSpec {
        self.cf().args(["bind-service", app, service])
    }

    pub fn restage(&self, app: &str) -> CommandSpec {
        self.cf().args(["restage", app])
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
