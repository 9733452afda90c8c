use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use std::fmt;

use crate::data::Candle;
use crate::swings::{SwingLabel, SwingPoint};
use crate::trend::{TrendVerdict, trend_at};

/// What ended the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalLabel {
    Swing(SwingLabel),
    /// No opposite swing point after the entry; the window runs to the last candle.
    EndOfData,
}

impl fmt::Display for ReversalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReversalLabel::Swing(label) => write!(f, "{label}"),
            ReversalLabel::EndOfData => f.write_str("end of data"),
        }
    }
}

impl Serialize for ReversalLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of holding from the close of an entry candle to the next reversal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub entry_index: usize,
    pub entry_ts: DateTime<Utc>,
    pub reversal_index: usize,
    pub reversal_ts: DateTime<Utc>,
    pub entry_price: f64,
    pub reversal_price: f64,
    /// Highest close in the window (at least the entry price).
    pub max_favorable_price: f64,
    /// Lowest close in the window (at most the entry price).
    pub max_adverse_price: f64,
    pub max_favorable_pct: f64,
    pub max_adverse_pct: f64,
    pub final_pnl_abs: f64,
    pub final_pnl_pct: f64,
    /// Candles from entry to reversal, both included.
    pub candle_count: usize,
    pub trend: TrendVerdict,
    pub reversal_label: ReversalLabel,
}

/// Analyse a position opened at the close of `entry_index`.
///
/// `swings` must be sorted by index (as produced by
/// [`crate::swings::compute_swing_points`]). The window ends at the first
/// swing point after the entry whose category (high or low) is opposite to
/// the last swing point at or before the entry. Later points of the same
/// category are skipped; if no opposite point follows, the window runs to
/// the last candle ([`ReversalLabel::EndOfData`]). Only when no swing point
/// exists at or before the entry does the first later point of either
/// category end the window.
///
/// Returns `None` when `entry_index` is the last candle or beyond.
pub fn analyze(
    candles: &[Candle],
    entry_index: usize,
    swings: &[SwingPoint],
) -> Option<AnalysisResult> {
    if entry_index >= candles.len().saturating_sub(1) {
        return None;
    }

    let entry = &candles[entry_index];
    let entry_price = entry.close;

    let (reversal_index, reversal_label) = match find_reversal(swings, entry_index) {
        Some(point) if point.index < candles.len() => {
            (point.index, ReversalLabel::Swing(point.label))
        }
        _ => (candles.len() - 1, ReversalLabel::EndOfData),
    };

    let (max_favorable_price, max_adverse_price) = candles[entry_index + 1..=reversal_index]
        .iter()
        .fold((entry_price, entry_price), |(max, min), c| {
            (max.max(c.close), min.min(c.close))
        });

    let reversal = &candles[reversal_index];
    let final_pnl_abs = reversal.close - entry_price;

    Some(AnalysisResult {
        entry_index,
        entry_ts: entry.ts,
        reversal_index,
        reversal_ts: reversal.ts,
        entry_price,
        reversal_price: reversal.close,
        max_favorable_price,
        max_adverse_price,
        max_favorable_pct: pct(max_favorable_price - entry_price, entry_price),
        max_adverse_pct: pct(max_adverse_price - entry_price, entry_price),
        final_pnl_abs,
        final_pnl_pct: pct(final_pnl_abs, entry_price),
        candle_count: reversal_index - entry_index + 1,
        trend: trend_at(swings, entry_index),
        reversal_label,
    })
}

fn find_reversal(swings: &[SwingPoint], entry_index: usize) -> Option<&SwingPoint> {
    let split = swings.partition_point(|p| p.index <= entry_index);
    let (before, after) = swings.split_at(split);

    match before.last() {
        Some(prev) => {
            let wanted = prev.label.kind().opposite();
            after.iter().find(|p| p.label.kind() == wanted)
        }
        None => after.first(),
    }
}

fn pct(delta: f64, base: f64) -> f64 {
    if base == 0.0 { 0.0 } else { delta / base * 100.0 }
}
