use crate::data::Candle;

use super::point::{RawExtremum, SwingKind};

/// Smallest series that can hold one full `lookback` window.
pub fn min_candles(lookback: usize) -> usize {
    lookback.saturating_mul(2).saturating_add(1)
}

/// Find local highs and lows confirmed by `lookback` candles on each side.
///
/// Candle `i` is a swing high if its high is strictly above every other high
/// in `[i - lookback, i + lookback]`, and a swing low if its low is strictly
/// below every other low in that window. Ties disqualify. An outside bar can
/// be both; the high is emitted first.
///
/// Returns an empty vec when the series is shorter than [`min_candles`].
///
/// # Panics
/// If `lookback` is zero.
pub fn detect(candles: &[Candle], lookback: usize) -> Vec<RawExtremum> {
    assert!(lookback >= 1, "lookback must be at least 1");

    if candles.len() < min_candles(lookback) {
        return Vec::new();
    }

    let mut extrema = Vec::new();

    for i in lookback..candles.len() - lookback {
        let candle = &candles[i];
        let window = &candles[i - lookback..=i + lookback];

        if neighbours(window, lookback).all(|c| candle.high > c.high) {
            extrema.push(RawExtremum {
                index: i,
                ts: candle.ts,
                price: candle.high,
                kind: SwingKind::High,
            });
        }

        if neighbours(window, lookback).all(|c| candle.low < c.low) {
            extrema.push(RawExtremum {
                index: i,
                ts: candle.ts,
                price: candle.low,
                kind: SwingKind::Low,
            });
        }
    }

    extrema
}

/// Every candle of `window` except the one at `centre`.
fn neighbours(window: &[Candle], centre: usize) -> impl Iterator<Item = &Candle> {
    window
        .iter()
        .enumerate()
        .filter(move |(j, _)| *j != centre)
        .map(|(_, c)| c)
}
