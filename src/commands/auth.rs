// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::sync::print_report;
use crate::sync::SyncCoordinator;
use anyhow::Result;

pub fn login(sync: &SyncCoordinator, sub: &clap::ArgMatches) -> Result<()> {
    let company = sub.get_one::<String>("company").unwrap();
    let user = sub.get_one::<String>("user").unwrap();
    let password = sub.get_one::<String>("password").unwrap();

    let outcome = sync.login(company, user, password)?;
    let who = outcome
        .session
        .profile
        .as_ref()
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| outcome.session.user_id.clone());
    println!("Signed in as {} ({})", who, outcome.session.company_id);
    match outcome.sync {
        Ok(report) => print_report(&report),
        Err(err) => println!("Initial sync failed: {}", err),
    }
    Ok(())
}

pub fn logout(sync: &SyncCoordinator, sub: &clap::ArgMatches) -> Result<()> {
    sync.session().invalidate();
    if sub.get_flag("purge") {
        sync.store().clear()?;
        println!("Signed out; cached dashboard and products cleared");
    } else {
        println!("Signed out");
    }
    Ok(())
}
