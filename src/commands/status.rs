// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::sync::SyncCoordinator;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(sync: &SyncCoordinator, config: &Config) -> Result<()> {
    let mut rows = Vec::new();

    match sync.session().current() {
        Some(s) => {
            rows.push(vec!["session".into(), format!("{} @ {}", s.user_id, s.company_id)]);
            rows.push(vec!["account".into(), s.account_id().to_string()]);
            let last = s
                .last_synced_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "never".into());
            rows.push(vec!["last_sync".into(), last]);
        }
        None => rows.push(vec!["session".into(), "signed out".into()]),
    }

    // Local read failures show as missing data, never abort the summary
    {
        let store = sync.store();
        let dashboard = match store.dashboard_updated_at() {
            Ok(Some(at)) => format!("cached ({})", at),
            Ok(None) => "none".into(),
            Err(err) => {
                tracing::warn!(error = %err, "dashboard status unreadable");
                "unavailable".into()
            }
        };
        rows.push(vec!["dashboard".into(), dashboard]);
        let products = match store.product_count() {
            Ok(n) => n.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "product count unreadable");
                "unavailable".into()
            }
        };
        rows.push(vec!["products".into(), products]);
    }

    rows.push(vec!["api_url".into(), config.api_url.clone()]);
    let online = if sync.is_connected() { "online" } else { "offline" };
    rows.push(vec!["network".into(), online.into()]);

    println!("{}", pretty_table(&["Item", "Detail"], rows));
    Ok(())
}
