// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn account_arg() -> Arg {
    Arg::new("account")
        .long("account")
        .value_name("ID")
        .help("Account id (defaults to the signed-in account)")
}

pub fn build_cli() -> Command {
    Command::new("salesync")
        .version(crate_version!())
        .about("Offline-first dashboard and product catalog cache for field sales")
        .arg(
            Arg::new("offline")
                .long("offline")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Treat the device as disconnected and serve cached data"),
        )
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .global(true)
                .value_name("URL")
                .help("Backend base URL (overrides SALESYNC_API_URL and saved config)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_name("SECS")
                .value_parser(value_parser!(u64).range(1..))
                .help("HTTP request timeout in seconds"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("log_json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(Command::new("init").about("Create the local cache database"))
        .subcommand(
            Command::new("login")
                .about("Sign in and sync the dashboard and catalog")
                .arg(Arg::new("company").long("company").required(true).value_name("ID"))
                .arg(Arg::new("user").long("user").required(true).value_name("ID"))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("logout").about("Forget the session").arg(
                Arg::new("purge")
                    .long("purge")
                    .action(ArgAction::SetTrue)
                    .help("Also clear the cached dashboard and products"),
            ),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Show dashboard KPIs (cached when offline)")
                .arg(account_arg())
                .arg(Arg::new("month").long("month").value_name("MM").requires("year"))
                .arg(Arg::new("year").long("year").value_name("YYYY").requires("month")),
        ))
        .subcommand(json_flags(
            Command::new("sync")
                .about("Fetch the dashboard and catalog and update the cache")
                .arg(account_arg()),
        ))
        .subcommand(
            Command::new("products")
                .about("Cached product catalog")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List cached products")
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Export cached products")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("customers")
                .about("Customer list for the account (requires network)")
                .arg(account_arg()),
        ))
        .subcommand(Command::new("status").about("Session, cache and connectivity summary"))
        .subcommand(
            Command::new("config")
                .about("Saved configuration")
                .subcommand(Command::new("show").about("Show effective configuration"))
                .subcommand(
                    Command::new("set-api-url")
                        .about("Save the backend base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(
                    Command::new("set-timeout")
                        .about("Save the HTTP timeout in seconds")
                        .arg(Arg::new("secs").required(true)),
                ),
        )
}
