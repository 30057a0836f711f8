// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{API_URL_KEY, Config, TIMEOUT_KEY, parse_timeout, validate_api_url};
use crate::utils::{pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-api-url", sub)) => {
            let url = validate_api_url(sub.get_one::<String>("url").unwrap())?;
            set_setting(conn, API_URL_KEY, &url)?;
            println!("API URL set to {}", url);
        }
        Some(("set-timeout", sub)) => {
            let secs = parse_timeout(sub.get_one::<String>("secs").unwrap())?;
            set_setting(conn, TIMEOUT_KEY, &secs.to_string())?;
            println!("Timeout set to {}s", secs);
        }
        Some(("show", _)) | None => {
            let rows = vec![
                vec![
                    "api_url".to_string(),
                    config.api_url.clone(),
                    config.api_url_source.as_str().to_string(),
                ],
                vec![
                    "timeout_secs".to_string(),
                    config.timeout_secs.to_string(),
                    config.timeout_source.as_str().to_string(),
                ],
                vec![
                    "offline".to_string(),
                    config.offline.to_string(),
                    "flag".to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Key", "Value", "Source"], rows));
        }
        _ => {}
    }
    Ok(())
}
