//! Language katas as a runnable catalog.
//!
//! `katas run` executes every demonstration and reports which ones hold;
//! `katas list` shows the topic groups.

mod cli;
mod config;
mod content;
mod js;

use std::path::PathBuf;

use anyhow::Result;
use catalog::GroupPath;
use catalog::exit_codes;
use catalog::io::config::CONFIG_FILE;
use clap::{Parser, Subcommand};

use crate::config::{FormatArg, RunOverrides};

#[derive(Parser)]
#[command(name = "katas", version, about = "Run language katas as checked demonstrations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every group path and how many katas it holds.
    List {
        /// Only groups under this path, e.g. `strings/repeat`.
        #[arg(long)]
        filter: Option<GroupPath>,
    },
    /// Run the katas and print a report.
    Run {
        /// Only katas under this group path.
        #[arg(long)]
        filter: Option<GroupPath>,
        /// Budget in milliseconds for each async kata to settle.
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Also list passing katas.
        #[arg(short, long)]
        verbose: bool,
        #[arg(long, default_value = CONFIG_FILE)]
        config: PathBuf,
    },
    /// Write the default `katas.toml`.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    catalog::logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::List { filter } => cli::cmd_list(filter.as_ref()),
        Command::Run {
            filter,
            timeout_ms,
            format,
            verbose,
            config,
        } => {
            let overrides = RunOverrides {
                timeout_ms,
                format,
                verbose,
            };
            cli::cmd_run(&config, filter, &overrides)
        }
        Command::Init { force } => cli::cmd_init(&std::env::current_dir()?, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_parse() {
        let cli = Cli::parse_from([
            "katas",
            "run",
            "--filter",
            "/strings/repeat/",
            "--timeout-ms",
            "50",
            "--format",
            "json",
            "-v",
        ]);
        let Command::Run {
            filter,
            timeout_ms,
            format,
            verbose,
            config,
        } = cli.command
        else {
            panic!("expected run");
        };
        assert_eq!(filter.map(|path| path.to_string()).as_deref(), Some("strings/repeat"));
        assert_eq!(timeout_ms, Some(50));
        assert_eq!(format, Some(FormatArg::Json));
        assert!(verbose);
        assert_eq!(config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["katas", "run", "--format", "yaml"]).is_err());
    }
}
