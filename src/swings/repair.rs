use serde::Serialize;

use crate::data::Candle;

use super::classify::LabelState;
use super::point::{SwingKind, SwingPoint};

/// Two same-kind points with no candle strictly between them, so no
/// opposite-kind point could be synthesized. The sequence is left
/// non-alternating at this spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepairGap {
    pub before: usize,
    pub after: usize,
    pub kind: SwingKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    pub points: Vec<SwingPoint>,
    pub gaps: Vec<RepairGap>,
}

/// Insert the missing opposite-kind point between every back-to-back pair of
/// highs (or lows).
///
/// Between two highs the lowest low strictly between them becomes a low;
/// between two lows the highest high becomes a high. Points are walked in
/// index order (stable, like [`super::relabel`]) and each one is compared
/// with the last *emitted* point, so insertions cascade. Points whose index
/// lies outside `candles` are dropped. Labels of inserted points are
/// provisional; [`super::relabel`] is authoritative.
pub fn repair(mut points: Vec<SwingPoint>, candles: &[Candle]) -> RepairOutcome {
    points.sort_by_key(|p| p.index);
    points.retain(|p| {
        let inside = p.index < candles.len();
        if !inside {
            log::warn!(
                "dropping {:?} point at {}: series has {} candles",
                p.kind,
                p.index,
                candles.len()
            );
        }
        inside
    });

    let mut state = LabelState::default();
    let mut out: Vec<SwingPoint> = Vec::with_capacity(points.len() * 2);
    let mut gaps = Vec::new();

    for point in points {
        if let Some(prev) = out.last().copied().filter(|prev| prev.kind == point.kind) {
            match synthesize(candles, &prev, &point, &state) {
                Some(synthetic) => {
                    log::debug!(
                        "inserted synthetic {:?} at {} between {} and {}",
                        synthetic.kind,
                        synthetic.index,
                        prev.index,
                        point.index
                    );
                    state.record(synthetic);
                    out.push(synthetic);
                }
                None => {
                    log::warn!(
                        "no candles between {:?} points at {} and {}, alternation left broken",
                        point.kind,
                        prev.index,
                        point.index
                    );
                    gaps.push(RepairGap {
                        before: prev.index,
                        after: point.index,
                        kind: point.kind,
                    });
                }
            }
        }

        state.record(point);
        out.push(point);
    }

    RepairOutcome { points: out, gaps }
}

/// Opposite-kind extreme over `candles[prev.index + 1 .. next.index]`.
/// The earliest candle wins ties. `None` when the interval is empty.
fn synthesize(
    candles: &[Candle],
    prev: &SwingPoint,
    next: &SwingPoint,
    state: &LabelState,
) -> Option<SwingPoint> {
    let start = prev.index + 1;
    if start >= next.index {
        return None;
    }
    let between = &candles[start..next.index];
    let kind = prev.kind.opposite();

    let price_of = |c: &Candle| match kind {
        SwingKind::High => c.high,
        SwingKind::Low => c.low,
    };
    let better = |candidate: f64, best: f64| match kind {
        SwingKind::High => candidate > best,
        SwingKind::Low => candidate < best,
    };

    let (offset, candle) = between
        .iter()
        .enumerate()
        .reduce(|best, cur| if better(price_of(cur.1), price_of(best.1)) { cur } else { best })?;

    let price = price_of(candle);
    Some(SwingPoint {
        index: start + offset,
        ts: candle.ts,
        price,
        kind,
        label: state.label_for(kind, price),
    })
}
