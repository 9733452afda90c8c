use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;

use swing_trend::{
    config::Config,
    output::{print_instrument_report, to_json},
    report::run_batch,
};

/// Detect swings and trend for every instrument and timeframe listed in a
/// config file.
#[derive(Debug, Parser)]
struct Args {
    /// Path to config file (toml, yaml, json; extension optional)
    #[arg(long)]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = Config::load(args.config)?;

    log::info!(
        "{} instruments, timeframes {:?}, lookback {}",
        config.instruments.len(),
        config.timeframes,
        config.lookback
    );

    let results = run_batch(&config);
    let (reports, failures): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    let reports: Vec<_> = reports.into_iter().filter_map(Result::ok).collect();

    if config.json {
        println!("{}", to_json(&reports)?);
    } else {
        for report in &reports {
            print_instrument_report(report);
            println!();
        }
    }

    if !failures.is_empty() {
        eprintln!("{} of {} instruments failed to load", failures.len(), config.instruments.len());
        for err in failures.into_iter().filter_map(Result::err) {
            eprintln!("  {err:#}");
        }
    }

    Ok(())
}
