use serde::Serialize;

use std::fmt;

use crate::swings::{SwingLabel, SwingPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendVerdict {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for TrendVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendVerdict::Bullish => "BULLISH",
            TrendVerdict::Bearish => "BEARISH",
            TrendVerdict::Neutral => "NEUTRAL",
        };
        f.pad(name)
    }
}

/// Verdict when there are no swing points at all.
///
/// Kept for compatibility with existing consumers; an empty history arguably
/// says nothing and `Neutral` would be the more honest answer.
pub const DEFAULT_VERDICT: TrendVerdict = TrendVerdict::Bullish;

/// Most points the oracle looks at.
pub const MAX_PATTERN_LEN: usize = 4;

/// Trend verdict from the most recent swing points, oldest first.
///
/// Only the last four points are used. A four-point pattern that is not in
/// the table falls back to its trailing three, then its trailing two.
pub fn trend(points: &[SwingPoint]) -> TrendVerdict {
    let start = points.len().saturating_sub(MAX_PATTERN_LEN);
    let labels: Vec<SwingLabel> = points[start..].iter().map(|p| p.label).collect();
    trend_from_labels(&labels)
}

/// [`trend`] over the swing points at or before candle `reference_index`.
pub fn trend_at(points: &[SwingPoint], reference_index: usize) -> TrendVerdict {
    let end = points.partition_point(|p| p.index <= reference_index);
    trend(&points[..end])
}

/// Same as [`trend`] but on bare labels, oldest first.
pub fn trend_from_labels(labels: &[SwingLabel]) -> TrendVerdict {
    let start = labels.len().saturating_sub(MAX_PATTERN_LEN);
    let labels = &labels[start..];

    match labels {
        [] => DEFAULT_VERDICT,
        [single] => single_point(*single),
        [a, b] => two_point(*a, *b),
        [_, rest @ ..] if rest.len() == 2 => {
            three_point(labels).unwrap_or_else(|| two_point(rest[0], rest[1]))
        }
        [_, rest @ ..] => four_point(labels)
            .or_else(|| three_point(rest))
            .unwrap_or_else(|| two_point(rest[1], rest[2])),
    }
}

fn single_point(label: SwingLabel) -> TrendVerdict {
    use crate::swings::SwingLabel::*;
    match label {
        HH | HL => TrendVerdict::Bullish,
        LH | LL => TrendVerdict::Bearish,
    }
}

/// `first` is the older point.
fn two_point(first: SwingLabel, second: SwingLabel) -> TrendVerdict {
    use crate::swings::SwingLabel::*;
    match (first, second) {
        (HH, HL) | (HH, LH) | (HH, LL) => TrendVerdict::Bullish,
        (HL, HH) | (HL, LL) => TrendVerdict::Bullish,
        (LL, LH) | (LL, HL) | (LL, HH) => TrendVerdict::Bearish,
        (LH, LL) | (LH, HH) => TrendVerdict::Bearish,
        // HH,HH  HL,HL  HL,LH  LL,LL  LH,LH  LH,HL
        _ => TrendVerdict::Neutral,
    }
}

fn three_point(labels: &[SwingLabel]) -> Option<TrendVerdict> {
    use crate::swings::SwingLabel::*;
    match labels {
        [LL, HL, HH] | [LH, HL, HH] | [HL, HH, HL] | [LL, LH, HL] | [HH, HL, HH] => {
            Some(TrendVerdict::Bullish)
        }
        [HH, LH, LL] | [HL, LH, LL] | [LH, LL, LH] | [HH, HL, LH] | [LL, LH, LL] => {
            Some(TrendVerdict::Bearish)
        }
        [HL, LH, HL] | [LH, HL, LH] => Some(TrendVerdict::Neutral),
        _ => None,
    }
}

fn four_point(labels: &[SwingLabel]) -> Option<TrendVerdict> {
    use crate::swings::SwingLabel::*;
    match labels {
        [LL, HL, HH, HL] | [LL, LH, HL, HH] | [LH, LL, HL, HH] | [HL, HH, HL, HH]
        | [HH, HL, HH, HL] => Some(TrendVerdict::Bullish),
        [HH, LH, LL, LH] | [HH, HL, LH, LL] | [HL, HH, LH, LL] | [LH, LL, LH, LL]
        | [LL, LH, LL, LH] => Some(TrendVerdict::Bearish),
        _ => None,
    }
}
