// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::http_client;
use reqwest::blocking::Client;
use std::error::Error as _;
use std::io;
use std::time::Duration;

/// Point-in-time reachability check. Results are never cached.
pub trait Connectivity: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Forced state, e.g. from `--offline`.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub bool);

impl Connectivity for Fixed {
    fn is_connected(&self) -> bool {
        self.0
    }
}

/// Asks the backend's `/health` endpoint, bounded by the configured timeout.
///
/// Any HTTP answer, whatever its status, means the network is up, and so does
/// a refused connection. Only a timeout or a connect failure that never
/// reached the host (name resolution, unreachable network) reports offline.
/// Anything else is ambiguous and assumed connected; the fetch path then
/// classifies whatever goes wrong.
#[derive(Debug, Clone)]
pub struct HttpHealth {
    client: Option<Client>,
    url: String,
}

impl HttpHealth {
    pub fn for_api(api_url: &str, timeout: Duration) -> Self {
        let client = match http_client(timeout) {
            Ok(c) => Some(c),
            Err(err) => {
                tracing::warn!(error = %err, "could not build health check client");
                None
            }
        };
        Self {
            client,
            url: format!("{}/health", api_url.trim_end_matches('/')),
        }
    }
}

impl Connectivity for HttpHealth {
    fn is_connected(&self) -> bool {
        let Some(client) = &self.client else {
            return true;
        };
        match client.get(&self.url).send() {
            Ok(resp) => {
                tracing::debug!(status = resp.status().as_u16(), "health check answered");
                true
            }
            Err(err) => {
                let online = reachable_despite(&err);
                tracing::debug!(url = %self.url, error = %err, online, "health check failed");
                online
            }
        }
    }
}

fn reachable_despite(err: &reqwest::Error) -> bool {
    if err.is_timeout() {
        return false;
    }
    if err.is_connect() {
        return io_kind(err) == Some(io::ErrorKind::ConnectionRefused);
    }
    true
}

/// First `io::ErrorKind` in the error's source chain.
fn io_kind(err: &reqwest::Error) -> Option<io::ErrorKind> {
    let mut source = err.source();
    while let Some(e) = source {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = e.source();
    }
    None
}
