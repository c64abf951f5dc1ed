// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `upcheck` binary: measures platform uptime by probing it
//! continuously for a configured duration.
//!
//! Exit codes: 0 when the session ran and every probe stayed within its
//! failure budget, 1 when the session failed (setup failure or a budget
//! blown), 2 when the config file is unusable.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use upcheck_core::Config;
use upcheck_engine::{Session, SessionOptions};

#[derive(Debug, Parser)]
#[command(name = "upcheck", version, about = "Platform uptime measurement harness")]
struct Args {
    /// Session configuration file (JSON).
    #[arg(long = "config-file", value_name = "PATH")]
    config_file: PathBuf,

    /// Write the JSON verdict here once the session finishes.
    #[arg(long = "result-file", value_name = "PATH")]
    result_file: Option<PathBuf>,

    /// Let the platform detect the sample apps' buildpack instead of
    /// pinning it.
    #[arg(long = "use-buildpack-detection")]
    use_buildpack_detection: bool,
}

const EXIT_SESSION_FAILED: u8 = 1;
const EXIT_BAD_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match Config::load(&args.config_file) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::from(EXIT_BAD_CONFIG);
        }
    };

    match run_session(&config, &args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_SESSION_FAILED),
        Err(err) => {
            tracing::error!("session failed: {err:#}");
            ExitCode::from(EXIT_SESSION_FAILED)
        }
    }
}

async fn run_session(config: &Config, args: &Args) -> anyhow::Result<bool> {
    let options = SessionOptions {
        use_buildpack_detection: args.use_buildpack_detection,
        result_file: args.result_file.clone(),
    };
    let session = Session::prepare(config, &options).context("preparing session")?;
    for name in session.probe_names() {
        tracing::info!(probe = name, "scheduled");
    }
    if !config.optional_probes.run_app_syslog_availability {
        tracing::info!("app syslog availability probe disabled");
    }

    let verdict = session.run().await.context("running session")?;
    Ok(verdict.overall_success)
}
