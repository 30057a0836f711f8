// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::account_id;
use crate::sync::SyncCoordinator;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(sync: &SyncCoordinator, sub: &clap::ArgMatches) -> Result<()> {
    let account = account_id(sync, sub)?;
    let customers = sync.customers(&account)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &customers)? {
        let rows = customers
            .into_iter()
            .map(|c| {
                vec![
                    c.code,
                    c.name,
                    c.address.unwrap_or_default(),
                    c.route.unwrap_or_default(),
                    c.journey_day.unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Code", "Name", "Address", "Route", "Day"], rows)
        );
    }
    Ok(())
}
