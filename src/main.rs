use std::process;
use village_trade_report::{
    ReportConfig, ReportError,
    analysis::analyze_events,
    cli::{CliArgs, parse_args},
    events::EventLog,
    report::format_report,
};

/// Entry point for the trade report.
fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error parsing arguments: {}", e);
            process::exit(1);
        }
    };

    let default_filter = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error analyzing event log: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), ReportError> {
    let config = match &args.config_file {
        Some(path) => ReportConfig::load_from_file(path)?,
        None => ReportConfig::default(),
    };
    let path = args.file.as_ref().unwrap_or(&config.default_log_path);

    let log = EventLog::load_from_file(path)?;
    let report = analyze_events(log.events(), &config)?;
    print!("{}", format_report(&report));

    Ok(())
}
