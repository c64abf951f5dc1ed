// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use upcheck_core::{AllowedFailures, OptionalProbes, Platform};

fn config(run_syslog: bool) -> Config {
    Config {
        platform: Platform {
            api: "https://api.example.com".into(),
            admin_user: "admin".into(),
            admin_password: "secret".into(),
            app_domain: "apps.example.com".into(),
        },
        duration_secs: 600,
        allowed_failures: AllowedFailures::default(),
        optional_probes: OptionalProbes {
            run_app_syslog_availability: run_syslog,
        },
    }
}

#[tokio::test]
async fn a_default_session_runs_the_four_core_probes() {
    let session = Session::prepare(&config(false), &SessionOptions::default()).unwrap();
    assert_eq!(
        session.probe_names(),
        [
            "HTTP availability",
            "app deployability",
            "recent logs",
            "streaming logs",
        ]
    );
}

#[tokio::test]
async fn enabling_the_syslog_probe_adds_it_to_the_schedule() {
    let session = Session::prepare(&config(true), &SessionOptions::default()).unwrap();
    assert!(session
        .probe_names()
        .contains(&"app syslog availability"));
}

#[test]
fn the_auth_expiry_predicate_matches_only_the_expired_login_message() {
    let retry = retry_on_expired_auth();
    assert!(retry(&format!("FAILED\n{AUTH_EXPIRED_MESSAGE}\n")));
    assert!(!retry("FAILED\nsome other error\n"));
}
