use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{Config, InstrumentConfig};
use crate::data::{Candle, Timeframe, get_candles_from_input_file, resample};
use crate::swings::{SwingSequence, compute_swing_points};
use crate::trend::{TrendVerdict, trend};

/// Swing points and trend of one series at one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeframeReport {
    pub timeframe: Timeframe,
    /// Candles after resampling.
    pub candle_count: usize,
    pub swings: SwingSequence,
    /// Verdict over the last swing points of the whole series.
    pub trend: TrendVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentReport {
    pub name: String,
    pub timeframes: Vec<TimeframeReport>,
}

pub fn analyze_timeframe(
    candles: &[Candle],
    timeframe: Timeframe,
    lookback: usize,
) -> TimeframeReport {
    let resampled = resample(candles, timeframe);
    let swings = compute_swing_points(&resampled, lookback);
    let trend = trend(&swings.points);

    TimeframeReport {
        timeframe,
        candle_count: resampled.len(),
        swings,
        trend,
    }
}

/// Each timeframe is independent, so they run in parallel. Output keeps the
/// order of `timeframes`.
pub fn analyze_timeframes(
    candles: &[Candle],
    timeframes: &[Timeframe],
    lookback: usize,
) -> Vec<TimeframeReport> {
    timeframes
        .par_iter()
        .map(|&timeframe| analyze_timeframe(candles, timeframe, lookback))
        .collect()
}

pub fn analyze_instrument(
    instrument: &InstrumentConfig,
    timeframes: &[Timeframe],
    lookback: usize,
) -> Result<InstrumentReport> {
    let candles = get_candles_from_input_file(&instrument.input)
        .with_context(|| format!("instrument {}", instrument.name))?;

    log::info!("{}: loaded {} candles", instrument.name, candles.len());

    Ok(InstrumentReport {
        name: instrument.name.clone(),
        timeframes: analyze_timeframes(&candles, timeframes, lookback),
    })
}

/// Analyze every configured instrument. A file that fails to load is logged
/// and reported in place; it does not stop the others.
pub fn run_batch(config: &Config) -> Vec<Result<InstrumentReport>> {
    config
        .instruments
        .par_iter()
        .map(|instrument| {
            let report = analyze_instrument(instrument, &config.timeframes, config.lookback);
            if let Err(err) = &report {
                log::warn!("{err:#}");
            }
            report
        })
        .collect()
}
