mod classify;
mod detect;
mod point;
mod relabel;
mod repair;

pub use classify::classify;
pub use detect::{detect, min_candles};
pub use point::{RawExtremum, SwingKind, SwingLabel, SwingMarker, SwingPoint};
pub use relabel::relabel;
pub use repair::{RepairGap, RepairOutcome, repair};

use serde::Serialize;

use crate::data::Candle;

pub const DEFAULT_LOOKBACK: usize = 5;

/// Final, relabeled swing points of one series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwingSequence {
    pub points: Vec<SwingPoint>,
    /// Places where two same-kind points could not be separated.
    pub gaps: Vec<RepairGap>,
}

impl SwingSequence {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// No two neighbouring points share a kind.
    pub fn is_alternating(&self) -> bool {
        self.points.windows(2).all(|w| w[0].kind != w[1].kind)
    }

    /// Points at or before candle `index`, oldest first.
    pub fn up_to(&self, index: usize) -> &[SwingPoint] {
        let end = self.points.partition_point(|p| p.index <= index);
        &self.points[..end]
    }

    pub fn markers(&self) -> Vec<SwingMarker> {
        self.points.iter().map(SwingPoint::marker).collect()
    }
}

/// Run detection, classification, repair and relabeling over `candles`.
///
/// # Panics
/// If `lookback` is zero.
pub fn compute_swing_points(candles: &[Candle], lookback: usize) -> SwingSequence {
    let raw = detect(candles, lookback);
    let detected = raw.len();

    let RepairOutcome { points, gaps } = repair(classify(raw), candles);
    let points = relabel(points);

    log::debug!(
        "{} candles, lookback {}: {} extrema detected, {} swing points after repair, {} gaps",
        candles.len(),
        lookback,
        detected,
        points.len(),
        gaps.len()
    );

    SwingSequence { points, gaps }
}
