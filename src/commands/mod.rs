// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod config;
pub mod customers;
pub mod dashboard;
pub mod products;
pub mod status;
pub mod sync;

use crate::config::Config;
use crate::connectivity::{Connectivity, Fixed, HttpHealth};
use crate::error::SyncError;
use crate::remote::HttpRemote;
use crate::session::SessionStore;
use crate::store::LocalStore;
use crate::sync::SyncCoordinator;
use anyhow::Result;
use rusqlite::Connection;
use std::sync::Arc;

/// Wires the coordinator for one CLI invocation.
pub fn coordinator(conn: Connection, config: &Config) -> Result<SyncCoordinator> {
    let session = Arc::new(SessionStore::open(crate::db::session_path()?)?);
    let remote = HttpRemote::new(config, Arc::clone(&session))?;
    let connectivity: Box<dyn Connectivity> = if config.offline {
        Box::new(Fixed(false))
    } else {
        Box::new(HttpHealth::for_api(&config.api_url, config.timeout()))
    };
    let store = LocalStore::open(conn)?;
    Ok(SyncCoordinator::new(
        Box::new(remote),
        connectivity,
        store,
        session,
    ))
}

/// `--account` if given, else the signed-in account.
pub fn account_id(sync: &SyncCoordinator, sub: &clap::ArgMatches) -> Result<String, SyncError> {
    if let Some(a) = sub
        .get_one::<String>("account")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        return Ok(a.to_string());
    }
    sync.session()
        .current()
        .map(|s| s.account_id().to_string())
        .ok_or(SyncError::NotLoggedIn)
}
