// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session assembly from a loaded config.
//!
//! Prepare wires everything a session needs: one temp `CF_HOME` per
//! actor so login state never crosses runners, staged sample-app dirs,
//! the platform workflows, and one periodic schedule per enabled probe.
//! The temp dirs are owned by the session and removed when it drops.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use thiserror::Error;

use upcheck_core::{Config, NameSource, SystemClock, UuidNames};
use upcheck_exec::CmdRunner;
use upcheck_probe::deploy::StepsFn;
use upcheck_probe::stream::StreamStepsFn;
use upcheck_probe::{
    no_retry, AppDeployability, AppLogValidator, HttpAvailability, Periodic, RecentLogs,
    RetryPredicate, SessionVerdict, StartMode, StreamingLogs,
};
use upcheck_workflow::sample::{self, SampleApp};
use upcheck_workflow::{CmdGenerator, PlatformWorkflow, Workflow};

use crate::orchestrator::{Orchestrator, OrchestratorError, WorkflowActions};

/// The platform CLI's expired-login message. Failures carrying it are
/// transient: the next attempt re-authenticates.
pub const AUTH_EXPIRED_MESSAGE: &str =
    "Authentication has expired.  Please log back in to re-authenticate.";

const HTTP_INTERVAL: Duration = Duration::from_secs(1);
const DEPLOY_INTERVAL: Duration = Duration::from_secs(60);
const RECENT_LOGS_INTERVAL: Duration = Duration::from_secs(10);
const STREAMING_LOGS_INTERVAL: Duration = Duration::from_secs(30);
const SYSLOG_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to prepare session workspace: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub use_buildpack_detection: bool,
    pub result_file: Option<PathBuf>,
}

/// A fully wired measurement session, ready to run once.
pub struct Session {
    orchestrator: Orchestrator<CmdRunner, CmdRunner, SystemClock>,
    homes: Vec<TempDir>,
    app_dirs: Vec<TempDir>,
}

fn retry_on_expired_auth() -> RetryPredicate {
    Arc::new(|diagnostic| diagnostic.contains(AUTH_EXPIRED_MESSAGE))
}

fn new_workflow(config: &Config, names: &UuidNames, app_dir: &std::path::Path) -> PlatformWorkflow {
    PlatformWorkflow::new(
        &config.platform,
        names.unique("upcheck-org"),
        names.unique("upcheck-space"),
        names.unique("upcheck-app"),
        app_dir,
    )
}

impl Session {
    pub fn prepare(config: &Config, options: &SessionOptions) -> Result<Self, SessionError> {
        let names = UuidNames;
        let run_syslog = config.optional_probes.run_app_syslog_availability;

        let heartbeat_dir = tempfile::tempdir()?;
        sample::stage(
            SampleApp::Heartbeat,
            heartbeat_dir.path(),
            options.use_buildpack_detection,
        )?;

        let main_wf = new_workflow(config, &names, heartbeat_dir.path());
        let push_wf = new_workflow(config, &names, heartbeat_dir.path());

        let mut homes = Vec::new();
        let mut home = || -> Result<CmdGenerator, SessionError> {
            let dir = tempfile::tempdir()?;
            let generator = CmdGenerator::new(dir.path());
            homes.push(dir);
            Ok(generator)
        };
        let orc_gen = home()?;
        let push_gen = home()?;
        let recent_gen = home()?;
        let stream_gen = home()?;

        let mut orc = Orchestrator::new(
            SystemClock,
            CmdRunner::buffered(),
            CmdRunner::inherited(),
            config.session_duration(),
        );
        if let Some(path) = &options.result_file {
            orc.set_result_file(path.clone());
        }

        let mut main_setup = main_wf.setup(&orc_gen);
        main_setup.extend(main_wf.push(&orc_gen));
        orc.add_workflow(WorkflowActions {
            label: "main".into(),
            setup: main_setup,
            teardown: main_wf.teardown(&orc_gen),
        });

        orc.add_workflow(WorkflowActions {
            label: "push".into(),
            setup: push_wf.setup(&push_gen),
            teardown: push_wf.teardown(&push_gen),
        });

        let budgets = config.allowed_failures;

        let http = HttpAvailability::new(main_wf.app_url())?;
        orc.add_probe(
            Periodic::new(http, SystemClock, HTTP_INTERVAL, StartMode::Immediate, no_retry())
                .plan(budgets.http_availability),
        );

        let deploy_wf = push_wf.clone();
        let deploy_gen = push_gen.clone();
        let deploy_steps: StepsFn = Box::new(move || {
            let wf = deploy_wf.with_app_name(names.unique("upcheck-app"));
            let mut steps = wf.push(&deploy_gen);
            steps.extend(wf.delete(&deploy_gen));
            steps
        });
        orc.add_probe(
            Periodic::new(
                AppDeployability::new(deploy_steps, CmdRunner::buffered()),
                SystemClock,
                DEPLOY_INTERVAL,
                StartMode::Immediate,
                retry_on_expired_auth(),
            )
            .plan(budgets.app_deployability),
        );

        let recent_wf = main_wf.clone();
        let recent_steps: StepsFn = Box::new(move || recent_wf.recent_logs(&recent_gen));
        orc.add_probe(
            Periodic::new(
                RecentLogs::new(recent_steps, CmdRunner::buffered(), AppLogValidator::new()),
                SystemClock,
                RECENT_LOGS_INTERVAL,
                StartMode::Immediate,
                retry_on_expired_auth(),
            )
            .plan(budgets.recent_logs),
        );

        let stream_wf = main_wf.clone();
        let stream_steps: StreamStepsFn = Box::new(move || stream_wf.stream_logs(&stream_gen));
        orc.add_probe(
            Periodic::new(
                StreamingLogs::new(stream_steps, CmdRunner::buffered(), AppLogValidator::new()),
                SystemClock,
                STREAMING_LOGS_INTERVAL,
                StartMode::Immediate,
                retry_on_expired_auth(),
            )
            .plan(budgets.streaming_logs),
        );

        let mut app_dirs = vec![heartbeat_dir];

        if run_syslog {
            let sink_dir = tempfile::tempdir()?;
            sample::stage(
                SampleApp::SyslogSink,
                sink_dir.path(),
                options.use_buildpack_detection,
            )?;
            let sink_wf = new_workflow(config, &names, sink_dir.path());
            app_dirs.push(sink_dir);

            let sink_dir_home = tempfile::tempdir()?;
            let sink_gen = CmdGenerator::new(sink_dir_home.path());
            homes.push(sink_dir_home);
            let syslog_home = tempfile::tempdir()?;
            let syslog_gen = CmdGenerator::new(syslog_home.path());
            homes.push(syslog_home);

            let mut sink_setup = sink_wf.setup(&sink_gen);
            sink_setup.extend(sink_wf.push(&sink_gen));
            sink_setup.extend(sink_wf.map_route(&sink_gen));
            orc.add_workflow(WorkflowActions {
                label: "sink".into(),
                setup: sink_setup,
                teardown: sink_wf.teardown(&sink_gen),
            });

            // Point the main app's drain at the sink's route. The sink
            // org teardown removes the service binding with the org.
            let drain_url = format!(
                "syslog://{}.{}",
                sink_wf.app_name(),
                config.platform.app_domain
            );
            orc.add_workflow(WorkflowActions {
                label: "syslog drain".into(),
                setup: main_wf.create_and_bind_syslog_drain(&orc_gen, &drain_url),
                teardown: Vec::new(),
            });

            let syslog_steps: StepsFn = Box::new(move || sink_wf.recent_logs(&syslog_gen));
            orc.add_probe(
                Periodic::new(
                    RecentLogs::syslog_drain(
                        syslog_steps,
                        CmdRunner::buffered(),
                        AppLogValidator::new(),
                    ),
                    SystemClock,
                    SYSLOG_INTERVAL,
                    StartMode::AfterFirstInterval,
                    retry_on_expired_auth(),
                )
                .plan(budgets.app_syslog_availability),
            );
        }

        Ok(Self {
            orchestrator: orc,
            homes,
            app_dirs,
        })
    }

    /// Names of the probes this session will run, for startup logging.
    pub fn probe_names(&self) -> Vec<&'static str> {
        self.orchestrator.probe_names()
    }

    /// Run the session to completion. Temp homes and staged app dirs
    /// outlive the run and are removed afterwards.
    pub async fn run(self) -> Result<SessionVerdict, OrchestratorError> {
        let Session {
            orchestrator,
            homes,
            app_dirs,
        } = self;
        let verdict = orchestrator.run().await;
        drop(homes);
        drop(app_dirs);
        verdict
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
