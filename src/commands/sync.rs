// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::account_id;
use crate::sync::{SyncCoordinator, SyncReport};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(sync: &SyncCoordinator, sub: &clap::ArgMatches) -> Result<()> {
    let account = account_id(sync, sub)?;
    let report = sync.sync_catalog_and_dashboard(&account)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        print_report(&report);
    }
    Ok(())
}

pub fn print_report(report: &SyncReport) {
    let note = |e: &Option<crate::error::SyncError>| {
        e.as_ref().map(|e| e.to_string()).unwrap_or_default()
    };
    let rows = vec![
        vec![
            "Dashboard".to_string(),
            if report.dashboard_written { "1" } else { "0" }.to_string(),
            if report.dashboard_written { "0" } else { "1" }.to_string(),
            note(&report.dashboard_error),
        ],
        vec![
            "Products".to_string(),
            report.products_written.to_string(),
            report.products_skipped.to_string(),
            note(&report.products_error),
        ],
    ];
    println!(
        "{}",
        pretty_table(&["Entity", "Written", "Skipped", "Note"], rows)
    );
    println!(
        "Synced account {} at {}",
        report.account_id,
        report.synced_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
