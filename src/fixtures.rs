//! Candle builders shared by the unit tests.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::data::Candle;

pub(crate) fn ts(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .expect("valid datetime")
        + TimeDelta::hours(i as i64)
}

/// One candle per `(high, low)` pair, opening and closing at the midpoint.
pub(crate) fn series_hl(bars: &[(f64, f64)]) -> Vec<Candle> {
    bars.iter()
        .enumerate()
        .map(|(i, &(high, low))| Candle {
            ts: ts(i),
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
            volume: 1.0,
        })
        .collect()
}

/// One candle per close, with a one-point wick on either side.
pub(crate) fn series_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            ts: ts(i),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1.0,
        })
        .collect()
}

/// Deterministic choppy series: two overlaid waves on a drift, with wicks
/// that vary per bar so neighbouring highs/lows practically never tie.
pub(crate) fn wave(len: usize, amplitude: f64, drift: f64) -> Vec<Candle> {
    (0..len)
        .map(|i| {
            let x = i as f64;
            let mid = 100.0
                + drift * x
                + amplitude * (x * 0.7).sin()
                + 0.37 * amplitude * (x * 1.9 + 0.3).sin();
            let high = mid + 0.5 + 0.1 * (x * 3.1).sin();
            let low = mid - 0.5 - 0.1 * (x * 2.3).cos();
            Candle {
                ts: ts(i),
                open: mid,
                high,
                low,
                close: mid + 0.05 * (x * 1.3).sin(),
                volume: 1.0 + x,
            }
        })
        .collect()
}
