// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use salesync::config::{Config, Overrides};
use salesync::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"), matches.get_flag("log_json"));

    let conn = db::open_or_init()?;
    let config = Config::resolve(
        &conn,
        Overrides::from_matches(&matches),
        Overrides::from_env()?,
        matches.get_flag("offline"),
    )?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::config::handle(&conn, &config, sub)?,
        Some((name, sub)) => {
            let sync = commands::coordinator(conn, &config)?;
            match name {
                "login" => commands::auth::login(&sync, sub)?,
                "logout" => commands::auth::logout(&sync, sub)?,
                "dashboard" => commands::dashboard::handle(&sync, sub)?,
                "sync" => commands::sync::handle(&sync, sub)?,
                "products" => commands::products::handle(&sync, sub)?,
                "customers" => commands::customers::handle(&sync, sub)?,
                "status" => commands::status::handle(&sync, &config)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
