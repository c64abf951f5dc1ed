// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered command sequences against the target platform.
//!
//! A workflow carries one deployment identity: org, space, app name, and
//! the staged app directory. It is deliberately stateless about login;
//! every sequence opens with the `api`/`auth` preamble so it works from
//! any `CF_HOME`, including a fresh one that never ran setup.

use std::path::{Path, PathBuf};

use upcheck_core::{CommandSpec, Platform};

use crate::generator::CmdGenerator;

pub trait Workflow: Send + Sync {
    fn org(&self) -> &str;
    fn space(&self) -> &str;
    fn app_name(&self) -> &str;

    /// Public route of the deployed app.
    fn app_url(&self) -> String;

    /// Create the org and space and leave the generator's home targeted
    /// at them.
    fn setup(&self, cmds: &CmdGenerator) -> Vec<CommandSpec>;

    fn push(&self, cmds: &CmdGenerator) -> Vec<CommandSpec>;

    fn delete(&self, cmds: &CmdGenerator) -> Vec<CommandSpec>;

    fn recent_logs(&self, cmds: &CmdGenerator) -> Vec<CommandSpec>;

    /// Login preamble plus the long-running tail command, kept separate
    /// because the tail is bounded by a stream deadline, not an exit.
    fn stream_logs(&self, cmds: &CmdGenerator) -> (Vec<CommandSpec>, CommandSpec);

    fn map_route(&self, cmds: &CmdGenerator) -> Vec<CommandSpec>;

    /// Bind a user-provided syslog drain to the app and restage it so the
    /// binding takes effect.
    fn create_and_bind_syslog_drain(
        &self,
        cmds: &CmdGenerator,
        drain_url: &str,
    ) -> Vec<CommandSpec>;

    /// Remove everything the workflow created. Safe to run after a
    /// partial or failed setup.
    fn teardown(&self, cmds: &CmdGenerator) -> Vec<CommandSpec>;
}

#[derive(Debug, Clone)]
pub struct PlatformWorkflow {
    api: String,
    user: String,
    password: String,
    domain: String,
    org: String,
    space: String,
    app_name: String,
    app_dir: PathBuf,
}

impl PlatformWorkflow {
    pub fn new(
        platform: &Platform,
        org: String,
        space: String,
        app_name: String,
        app_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api: platform.api.clone(),
            user: platform.admin_user.clone(),
            password: platform.admin_password.clone(),
            domain: platform.app_domain.clone(),
            org,
            space,
            app_name,
            app_dir: app_dir.into(),
        }
    }

    /// Same org, space, and artifact, different app. Used for the
    /// per-tick push probe where every tick deploys a fresh name.
    pub fn with_app_name(&self, app_name: String) -> Self {
        let mut clone = self.clone();
        clone.app_name = app_name;
        clone
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    fn service_name(&self) -> String {
        format!("{}-drain", self.app_name)
    }

    fn login(&self, cmds: &CmdGenerator) -> Vec<CommandSpec> {
        vec![
            cmds.api(&self.api),
            cmds.auth(&self.user, &self.password),
            cmds.target(&self.org, &self.space),
        ]
    }
}

impl Workflow for PlatformWorkflow {
    fn org(&self) -> &str {
        &self.org
    }

    fn space(&self) -> &str {
        &self.space
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn app_url(&self) -> String {
        format!("https://{}.{}", self.app_name, self.domain)
    }

    fn setup(&self, cmds: &CmdGenerator) -> Vec<CommandSpec> {
        vec![
            cmds.api(&self.api),
            cmds.auth(&self.user, &self.password),
            cmds.create_org(&self.org),
            cmds.create_space(&self.org, &self.space),
            cmds.target(&self.org, &self.space),
        ]
    }

    fn push(&self, cmds: &CmdGenerator) -> Vec<CommandSpec> {
        let mut steps = self.login(cmds);
        steps.push(cmds.push(&self.app_name, &self.app_dir));
        steps
    }

    fn delete(&self, cmds: &CmdGenerator) -> Vec<CommandSpec> {
        let mut steps = self.login(cmds);
        steps.push(cmds.delete(&self.app_name));
        steps
    }

    fn recent_logs(&self, cmds: &CmdGenerator) -> Vec<CommandSpec> {
        let mut steps = self.login(cmds);
        steps.push(cmds.recent_logs(&self.app_name));
        steps
    }

    fn stream_logs(&self, cmds: &CmdGenerator) -> (Vec<CommandSpec>, CommandSpec) {
        (self.login(cmds), cmds.stream_logs(&self.app_name))
    }

    fn map_route(&self, cmds: &CmdGenerator) -> Vec<CommandSpec> {
        let mut steps = self.login(cmds);
        steps.push(cmds.map_route(&self.app_name, &self.domain, &self.app_name));
        steps
    }

    fn create_and_bind_syslog_drain(
        &self,
        cmds: &CmdGenerator,
        drain_url: &str,
    ) -> Vec<CommandSpec> {
        let service = self.service_name();
        let mut steps = self.login(cmds);
        steps.push(cmds.create_user_provided_service(&service, drain_url));
        steps.push(cmds.bind_service(&self.app_name, &service));
        steps.push(cmds.restage(&self.app_name));
        steps
    }

    fn teardown(&self, cmds: &CmdGenerator) -> Vec<CommandSpec> {
        vec![
            cmds.api(&self.api),
            cmds.auth(&self.user, &self.password),
            cmds.delete_org(&self.org),
            cmds.logout(),
        ]
    }
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
