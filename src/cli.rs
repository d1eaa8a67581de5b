//! Command-line interface for the trade report.

use lexopt::prelude::*;
use std::path::PathBuf;

/// Command-line arguments for the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Event log to analyze; the configured default is used when absent.
    pub file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub debug: bool,
    pub verbose: bool,
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    parse_from(lexopt::Parser::from_env())
}

fn parse_from(mut args: lexopt::Parser) -> Result<CliArgs, lexopt::Error> {
    let mut cli_args = CliArgs::default();

    while let Some(arg) = args.next()? {
        match arg {
            Value(val) if cli_args.file.is_none() => {
                cli_args.file = Some(PathBuf::from(val.string()?));
            }
            Long("config") | Short('c') => {
                cli_args.config_file = Some(PathBuf::from(args.value()?.string()?));
            }
            Long("debug") => cli_args.debug = true,
            Long("verbose") | Short('v') => cli_args.verbose = true,
            Long("help") | Short('h') => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(cli_args)
}

fn print_help() {
    println!("\nVillage Trade Report\n");
    println!("USAGE:");
    println!("    village-trade-report [FILE] [OPTIONS]\n");

    println!("ARGS:");
    println!("    FILE                       Event log written by the simulator");
    println!("                               (default: strategy_evaluation/trading_vs_balanced.json)\n");

    println!("OPTIONS:");
    println!("    -c, --config <FILE>        Load report settings from a YAML file");
    println!("    --debug                    Enable debug logging");
    println!("    -v, --verbose              Enable info logging");
    println!("    -h, --help                 Print help information\n");

    println!("EXAMPLES:");
    println!("    village-trade-report simulation_events.json");
    println!("    village-trade-report runs/trading.json --config report.yaml --verbose");
}
