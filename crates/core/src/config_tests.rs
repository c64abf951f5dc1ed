// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

fn valid_json() -> serde_json::Value {
    serde_json::json!({
        "platform": {
            "api": "api.example.com",
            "admin_user": "admin",
            "admin_password": "secret",
            "app_domain": "apps.example.com"
        },
        "duration_secs": 600,
        "allowed_failures": {
            "http_availability": 5,
            "app_deployability": 2,
            "recent_logs": 2,
            "streaming_logs": 2,
            "app_syslog_availability": 2
        },
        "optional_probes": {
            "run_app_syslog_availability": true
        }
    })
}

fn write_config(value: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

#[test]
fn loads_a_complete_config() {
    let file = write_config(&valid_json());
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.platform.api, "api.example.com");
    assert_eq!(config.session_duration(), Duration::from_secs(600));
    assert_eq!(config.allowed_failures.http_availability, 5);
    assert!(config.optional_probes.run_app_syslog_availability);
}

#[test]
fn budgets_and_toggles_default_when_absent() {
    let mut value = valid_json();
    value.as_object_mut().unwrap().remove("allowed_failures");
    value.as_object_mut().unwrap().remove("optional_probes");
    let file = write_config(&value);

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.allowed_failures.app_deployability, 0);
    assert!(!config.optional_probes.run_app_syslog_availability);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn empty_platform_field_fails_validation() {
    let mut value = valid_json();
    value["platform"]["admin_password"] = serde_json::json!("");
    let file = write_config(&value);

    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingField {
            field: "platform.admin_password"
        }
    ));
}

#[test]
fn zero_duration_fails_validation() {
    let mut value = valid_json();
    value["duration_secs"] = serde_json::json!(0);
    let file = write_config(&value);

    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroDuration));
}
