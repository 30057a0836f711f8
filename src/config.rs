// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::get_setting;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const API_URL_ENV: &str = "SALESYNC_API_URL";
pub const TIMEOUT_ENV: &str = "SALESYNC_TIMEOUT_SECS";

pub const API_URL_KEY: &str = "api_url";
pub const TIMEOUT_KEY: &str = "timeout_secs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Flag,
    Env,
    Settings,
    Default,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Flag => "flag",
            Source::Env => "env",
            Source::Settings => "settings",
            Source::Default => "default",
        }
    }
}

/// Values supplied by one configuration layer (command line or environment).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Overrides {
    pub fn from_matches(m: &clap::ArgMatches) -> Self {
        Self {
            api_url: m
                .get_one::<String>("api_url")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            timeout_secs: m.get_one::<u64>("timeout").copied(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let timeout_secs = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => Some(parse_timeout(&raw).with_context(|| format!("Reading {}", TIMEOUT_ENV))?),
            Err(_) => None,
        };
        Ok(Self {
            api_url,
            timeout_secs,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub api_url: String,
    pub api_url_source: Source,
    pub timeout_secs: u64,
    pub timeout_source: Source,
    pub offline: bool,
}

impl Config {
    /// Precedence: command line, environment, `settings` table, built-in default.
    pub fn resolve(conn: &Connection, flags: Overrides, env: Overrides, offline: bool) -> Result<Self> {
        let (api_url, api_url_source) = if let Some(u) = flags.api_url {
            (u, Source::Flag)
        } else if let Some(u) = env.api_url {
            (u, Source::Env)
        } else if let Some(u) = get_setting(conn, API_URL_KEY)? {
            (u, Source::Settings)
        } else {
            (DEFAULT_API_URL.to_string(), Source::Default)
        };

        let (timeout_secs, timeout_source) = if let Some(t) = flags.timeout_secs {
            (t, Source::Flag)
        } else if let Some(t) = env.timeout_secs {
            (t, Source::Env)
        } else if let Some(raw) = get_setting(conn, TIMEOUT_KEY)? {
            (parse_timeout(&raw)?, Source::Settings)
        } else {
            (DEFAULT_TIMEOUT_SECS, Source::Default)
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_url_source,
            timeout_secs,
            timeout_source,
            offline,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn parse_timeout(raw: &str) -> Result<u64> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid timeout '{}', expected whole seconds", raw))?;
    if secs == 0 {
        return Err(anyhow!("Timeout must be at least 1 second"));
    }
    Ok(secs)
}

pub fn validate_api_url(raw: &str) -> Result<String> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|err| anyhow!("Invalid API URL '{}': {}", raw.trim(), err))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("API URL must use http or https, got '{}'", url.scheme()));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
