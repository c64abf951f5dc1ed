// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP availability probe.

use async_trait::async_trait;
use std::time::Duration;

use crate::probe::{Probe, ProbeOutcome};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues a GET against the long-lived app's URL. The client skips TLS
/// verification (routing endpoints use self-signed certificates) and
/// disables connection reuse so every tick opens a fresh connection and
/// exercises the routing layer.
pub struct HttpAvailability {
    url: String,
    client: reqwest::Client,
}

impl HttpAvailability {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl Probe for HttpAvailability {
    fn name(&self) -> &'static str {
        "HTTP availability"
    }

    async fn run(&mut self) -> ProbeOutcome {
        match self.client.get(&self.url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() || status.is_redirection() {
                    ProbeOutcome::ok()
                } else {
                    ProbeOutcome::failed(format!("GET {} returned {status}", self.url))
                }
            }
            Err(err) => ProbeOutcome::failed(format!("GET {} failed: {err}", self.url)),
        }
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
