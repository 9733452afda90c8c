use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;

use swing_trend::data::Timeframe;
use swing_trend::swings::DEFAULT_LOOKBACK;

#[derive(Debug, Parser)]
struct Args {
    /// Path to the CSV file (timestamp,open,high,low,close,volume)
    #[arg(long)]
    input: PathBuf,

    /// Candles on each side that must be strictly lower (higher) than a swing high (low)
    #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
    lookback: usize,

    /// Candle index to open the hypothetical position at
    #[arg(long)]
    entry: Option<usize>,

    /// Resample to this timeframe before detecting swings
    #[arg(long, value_enum, default_value_t = Timeframe::Native)]
    timeframe: Timeframe,

    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let lookback = swing_trend::config::validate_lookback(args.lookback)?;

    let raw = swing_trend::data::get_candles_from_input_file(&args.input)?;
    if raw.is_empty() {
        println!("No data found in CSV.");
        return Ok(());
    }

    let candles = swing_trend::data::resample(&raw, args.timeframe);
    log::info!(
        "Loaded {} candles, {} after resampling to {}",
        raw.len(),
        candles.len(),
        args.timeframe
    );

    let swings = swing_trend::swings::compute_swing_points(&candles, lookback);
    if candles.len() < swing_trend::swings::min_candles(lookback) {
        log::warn!(
            "Not enough data: need at least {} candles for lookback {}, got {}.",
            swing_trend::swings::min_candles(lookback),
            lookback,
            candles.len()
        );
    }

    let trend = swing_trend::trend::trend(&swings.points);

    let analysis = args
        .entry
        .and_then(|entry| swing_trend::analysis::analyze(&candles, entry, &swings.points));
    if let (Some(entry), None) = (args.entry, &analysis) {
        log::warn!(
            "No analysis for entry {}: it must be before the last candle (index {}).",
            entry,
            candles.len() - 1
        );
    }

    if args.json {
        let payload = swing_trend::output::ChartPayload::new(&swings, trend, analysis.as_ref());
        println!("{}", swing_trend::output::to_json(&payload)?);
        return Ok(());
    }

    println!(
        "Loaded {} candles ({}), {} swing points.",
        candles.len(),
        args.timeframe,
        swings.points.len()
    );
    swing_trend::output::print_swings(&swings);
    println!();
    swing_trend::output::print_trend(trend);

    if let Some(result) = &analysis {
        println!();
        swing_trend::output::print_analysis(result);
    }

    Ok(())
}
