use chrono::{DateTime, Utc};
use serde::Serialize;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SwingKind {
    High,
    Low,
}

impl SwingKind {
    pub fn opposite(self) -> Self {
        match self {
            SwingKind::High => SwingKind::Low,
            SwingKind::Low => SwingKind::High,
        }
    }
}

/// Position of a swing point relative to the previous swing point of the same kind.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SwingLabel {
    /// Higher high
    HH,
    /// Higher low
    HL,
    /// Lower high
    LH,
    /// Lower low
    LL,
}

impl SwingLabel {
    pub const ALL: [SwingLabel; 4] = [
        SwingLabel::HH,
        SwingLabel::HL,
        SwingLabel::LH,
        SwingLabel::LL,
    ];

    /// Label for a point of `kind` at `price`, given the price of the last
    /// point of the same kind. The first point of a kind counts as higher.
    pub fn classify(kind: SwingKind, price: f64, previous: Option<f64>) -> Self {
        let higher = previous.is_none_or(|prev| price > prev);
        match (kind, higher) {
            (SwingKind::High, true) => SwingLabel::HH,
            (SwingKind::High, false) => SwingLabel::LH,
            (SwingKind::Low, true) => SwingLabel::HL,
            (SwingKind::Low, false) => SwingLabel::LL,
        }
    }

    pub fn kind(self) -> SwingKind {
        match self {
            SwingLabel::HH | SwingLabel::LH => SwingKind::High,
            SwingLabel::HL | SwingLabel::LL => SwingKind::Low,
        }
    }
}

impl fmt::Display for SwingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwingLabel::HH => "HH",
            SwingLabel::HL => "HL",
            SwingLabel::LH => "LH",
            SwingLabel::LL => "LL",
        };
        f.pad(name)
    }
}

/// A local extremum straight out of the detector, not yet labeled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawExtremum {
    pub index: usize,
    pub ts: DateTime<Utc>,
    pub price: f64,
    pub kind: SwingKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwingPoint {
    /// Position in the candle series.
    pub index: usize,
    pub ts: DateTime<Utc>,
    /// The high (for [`SwingKind::High`]) or low (for [`SwingKind::Low`]) that qualified.
    pub price: f64,
    pub kind: SwingKind,
    pub label: SwingLabel,
}

impl SwingPoint {
    pub fn marker(&self) -> SwingMarker {
        SwingMarker {
            timestamp: self.ts,
            price: self.price,
            label: self.label,
        }
    }
}

/// What a chart needs to draw a swing point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwingMarker {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub label: SwingLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_first_point_of_each_kind_is_higher() {
        assert_eq!(SwingLabel::classify(SwingKind::High, 10.0, None), SwingLabel::HH);
        assert_eq!(SwingLabel::classify(SwingKind::Low, 10.0, None), SwingLabel::HL);
    }

    #[test]
    fn test_classify_equal_price_counts_as_lower() {
        // strict comparison: equal is not higher
        assert_eq!(SwingLabel::classify(SwingKind::High, 10.0, Some(10.0)), SwingLabel::LH);
        assert_eq!(SwingLabel::classify(SwingKind::Low, 10.0, Some(10.0)), SwingLabel::LL);
    }

    #[test]
    fn test_classify_label_always_matches_kind() {
        for kind in [SwingKind::High, SwingKind::Low] {
            for prev in [None, Some(5.0), Some(15.0)] {
                assert_eq!(SwingLabel::classify(kind, 10.0, prev).kind(), kind);
            }
        }
    }

    #[test]
    fn test_marker_serializes_timestamp_price_label() {
        let point = SwingPoint {
            index: 3,
            ts: DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
            price: 101.5,
            kind: SwingKind::High,
            label: SwingLabel::LH,
        };
        let json = serde_json::to_value(point.marker()).expect("serializable");

        assert_eq!(json["price"], 101.5);
        assert_eq!(json["label"], "LH");
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }
}
