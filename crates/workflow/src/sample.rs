// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Embedded sample-app payloads.
//!
//! The harness ships its own apps so a measurement session has no
//! external artifact dependencies. The heartbeat app answers HTTP and
//! prints its clock once a second; the log validator keys off those
//! epoch lines. The sink app echoes whatever it receives to its own log
//! stream, which is how drained syslog traffic becomes observable
//! through the platform's log retrieval.

use std::io;
use std::path::Path;

const APP_SOURCE: &str = r#"package main

import (
	"fmt"
	"log"
	"net/http"
	"os"
	"time"
)

func main() {
	go func() {
		for range time.Tick(time.Second) {
			fmt.Printf("%d\n", time.Now().UnixNano())
		}
	}()

	http.HandleFunc("/", func(w http.ResponseWriter, r *http.Request) {
		fmt.Fprintln(w, "ok")
	})
	log.Fatal(http.ListenAndServe(":"+os.Getenv("PORT"), nil))
}
"#;

const SYSLOG_SINK_SOURCE: &str = r#"package main

import (
	"bufio"
	"fmt"
	"log"
	"net/http"
	"os"
)

func main() {
	http.HandleFunc("/", func(w http.ResponseWriter, r *http.Request) {
		scanner := bufio.NewScanner(r.Body)
		for scanner.Scan() {
			fmt.Println(scanner.Text())
		}
		w.WriteHeader(http.StatusOK)
	})
	log.Fatal(http.ListenAndServe(":"+os.Getenv("PORT"), nil))
}
"#;

/// The two payloads a session can deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleApp {
    /// Long-lived HTTP app emitting epoch heartbeats.
    Heartbeat,
    /// Receives drained log traffic and re-emits it to its own log.
    SyslogSink,
}

impl SampleApp {
    fn source(self) -> &'static str {
        match self {
            SampleApp::Heartbeat => APP_SOURCE,
            SampleApp::SyslogSink => SYSLOG_SINK_SOURCE,
        }
    }

    fn module(self) -> &'static str {
        match self {
            SampleApp::Heartbeat => "upcheck-heartbeat",
            SampleApp::SyslogSink => "upcheck-syslog-sink",
        }
    }
}

fn manifest(use_buildpack_detection: bool) -> String {
    let mut text = String::from("---\napplications:\n- memory: 64M\n");
    if !use_buildpack_detection {
        text.push_str("  buildpacks:\n  - go_buildpack\n");
    }
    text
}

/// Write the app source, module file, and deployment manifest into
/// `dir`, making it pushable as-is.
pub fn stage(app: SampleApp, dir: &Path, use_buildpack_detection: bool) -> io::Result<()> {
    std::fs::write(dir.join("main.go"), app.source())?;
    std::fs::write(
        dir.join("go.mod"),
        format!("module {}\n\ngo 1.21\n", app.module()),
    )?;
    std::fs::write(dir.join("manifest.yml"), manifest(use_buildpack_detection))?;
    Ok(())
}

#[cfg(test)]
#[path = "sample_tests.rs"]
mod tests;
