// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::account_id;
use crate::models::{DashboardSnapshot, Period};
use crate::sync::SyncCoordinator;
use crate::utils::{fmt_decimal, maybe_print_json, parse_period, pretty_table};
use anyhow::Result;

pub fn handle(sync: &SyncCoordinator, sub: &clap::ArgMatches) -> Result<()> {
    let period = selected_period(sub)?;
    // The cached snapshot is not keyed by account, so offline reads work signed out.
    let account = match account_id(sync, sub) {
        Ok(a) => a,
        Err(err) if sync.is_connected() => return Err(err.into()),
        Err(_) => String::new(),
    };
    let snapshot = sync.load_dashboard(&account, period.as_ref())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &snapshot)? {
        print_snapshot(&snapshot);
    }
    Ok(())
}

pub fn selected_period(sub: &clap::ArgMatches) -> Result<Option<Period>> {
    match (sub.get_one::<String>("month"), sub.get_one::<String>("year")) {
        (Some(m), Some(y)) => Ok(Some(parse_period(m, y)?)),
        _ => Ok(None),
    }
}

/// Date range the snapshot covers. The server's own dates win; otherwise the
/// calendar month named by the snapshot is used.
pub fn period_range(snapshot: &DashboardSnapshot) -> Option<(String, String)> {
    let p = &snapshot.period;
    if let (Some(s), Some(e)) = (&p.start_date, &p.end_date) {
        return Some((s.clone(), e.clone()));
    }
    let period = parse_period(&p.month, &p.year).ok()?;
    Some((
        period.start_date()?.to_string(),
        period.end_date()?.to_string(),
    ))
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    let p = &snapshot.period;
    let range = match period_range(snapshot) {
        Some((s, e)) => format!(" ({} to {})", s, e),
        None => String::new(),
    };
    println!("Period {}/{}{}", p.month, p.year, range);
    let rows = snapshot
        .metrics
        .named()
        .into_iter()
        .map(|(name, m)| {
            vec![
                name.to_string(),
                fmt_decimal(&m.value),
                format!("{:+.1}%", m.percentage),
                m.formatted.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Metric", "Value", "Change", "Display"], rows)
    );
}
