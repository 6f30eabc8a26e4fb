// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print as pretty JSON")
}

fn jsonl_flag() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .action(ArgAction::SetTrue)
        .help("Print as JSON lines")
}

pub fn build_cli() -> Command {
    Command::new("sproutbook")
        .about("Plant-growing personal finance tracker")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database and seed first-run defaults"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["cash", "bank", "credit_card", "e_wallet"])
                                .default_value("cash"),
                        )
                        .arg(Arg::new("icon").long("icon").default_value("wallet.pass.fill"))
                        .arg(Arg::new("color").long("color").default_value("#58C2A9"))
                        .arg(
                            Arg::new("initial-balance")
                                .long("initial-balance")
                                .default_value("0"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List accounts with derived balances")
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account; its transactions keep their rows")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("set-default")
                        .about("Mark an account as the default for new transactions")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("icon").long("icon").default_value("tag.fill"))
                        .arg(Arg::new("color").long("color").default_value("#FF9F45")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category; its transactions keep their rows")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"])
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("date").long("date").default_value("today")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("account").long("account"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly analytics")
                .subcommand(
                    Command::new("month")
                        .about("Income, expense and net for a month")
                        .arg(Arg::new("month").long("month"))
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("categories")
                        .about("Expense breakdown by category with shares")
                        .arg(Arg::new("month").long("month"))
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("balances")
                        .about("Derived balance per account")
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                ),
        )
        .subcommand(
            Command::new("backup")
                .about("Portable JSON backups")
                .subcommand(
                    Command::new("create")
                        .about("Export the store to a backup file")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("inspect")
                        .about("Validate a backup file and show its summary")
                        .arg(Arg::new("file").long("file").required(true)),
                )
                .subcommand(
                    Command::new("restore")
                        .about("Replace the entire store with a backup file")
                        .arg(Arg::new("file").long("file").required(true))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm wiping the current store"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export").about("Exports for other tools").subcommand(
                Command::new("csv")
                    .about("Write transactions as CSV")
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("widget")
                .about("Home-screen widget snapshot")
                .subcommand(
                    Command::new("refresh")
                        .about("Rebuild the widget snapshot file")
                        .arg(Arg::new("out").long("out")),
                ),
        )
        .subcommand(
            Command::new("migrate")
                .about("One-time legacy store migration")
                .subcommand(
                    Command::new("run")
                        .about("Migrate the legacy local store if present")
                        .arg(Arg::new("legacy").long("legacy").help(
                            "Path to the legacy store (defaults to the standard location)",
                        )),
                ),
        )
        .subcommand(
            Command::new("seed")
                .about("Defaults and demo data")
                .subcommand(Command::new("defaults").about("Seed stock categories and a cash account"))
                .subcommand(Command::new("samples").about("Insert demo transactions (excluded from backups)"))
                .subcommand(Command::new("clear-samples").about("Remove demo transactions")),
        )
        .subcommand(
            Command::new("config")
                .about("Persisted configuration flags")
                .subcommand(
                    Command::new("get")
                        .about("Read a config key")
                        .arg(Arg::new("key").required(true)),
                )
                .subcommand(
                    Command::new("set")
                        .about("Write a config key")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("plant")
                .about("The decorative plant")
                .subcommand(
                    Command::new("status")
                        .about("Show growth stage and mood for a month")
                        .arg(Arg::new("month").long("month")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check store integrity"))
}
