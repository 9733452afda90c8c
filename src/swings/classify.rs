use super::point::{RawExtremum, SwingKind, SwingLabel, SwingPoint};

/// Last seen high and last seen low, threaded through a forward pass so each
/// new point is labeled against its same-kind predecessor.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LabelState {
    last_high: Option<SwingPoint>,
    last_low: Option<SwingPoint>,
}

impl LabelState {
    pub(crate) fn label_for(&self, kind: SwingKind, price: f64) -> SwingLabel {
        let previous = match kind {
            SwingKind::High => self.last_high,
            SwingKind::Low => self.last_low,
        };
        SwingLabel::classify(kind, price, previous.map(|p| p.price))
    }

    pub(crate) fn record(&mut self, point: SwingPoint) {
        match point.kind {
            SwingKind::High => self.last_high = Some(point),
            SwingKind::Low => self.last_low = Some(point),
        }
    }
}

/// Label raw extrema against the running same-kind history.
///
/// Highs and lows are tracked independently; alternation between them is
/// not enforced here (see [`super::repair`]).
pub fn classify(raw: Vec<RawExtremum>) -> Vec<SwingPoint> {
    let mut state = LabelState::default();

    raw.into_iter()
        .map(|r| {
            let point = SwingPoint {
                index: r.index,
                ts: r.ts,
                price: r.price,
                kind: r.kind,
                label: state.label_for(r.kind, r.price),
            };
            state.record(point);
            point
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn raw(index: usize, price: f64, kind: SwingKind) -> RawExtremum {
        RawExtremum {
            index,
            ts: DateTime::from_timestamp(index as i64 * 60, 0).expect("valid timestamp"),
            price,
            kind,
        }
    }

    fn labels(points: &[SwingPoint]) -> Vec<SwingLabel> {
        points.iter().map(|p| p.label).collect()
    }

    #[test]
    fn test_classify_empty_input_returns_empty_vec() {
        assert!(classify(Vec::new()).is_empty());
    }

    #[test]
    fn test_classify_tracks_highs_and_lows_independently() {
        // H 10 -> HH (first high)
        // L  5 -> HL (first low)
        // H 12 -> HH (12 > 10)
        // L  4 -> LL (4 < 5)
        // H 11 -> LH (11 < 12)
        // L  6 -> HL (6 > 4)
        let points = classify(vec![
            raw(5, 10.0, SwingKind::High),
            raw(10, 5.0, SwingKind::Low),
            raw(15, 12.0, SwingKind::High),
            raw(20, 4.0, SwingKind::Low),
            raw(25, 11.0, SwingKind::High),
            raw(30, 6.0, SwingKind::Low),
        ]);

        use crate::swings::SwingLabel::*;
        assert_eq!(labels(&points), vec![HH, HL, HH, LL, LH, HL]);
    }

    #[test]
    fn test_classify_does_not_enforce_alternation() {
        // Two highs in a row keep their raw order and are labeled against each other.
        let points = classify(vec![
            raw(5, 10.0, SwingKind::High),
            raw(12, 9.0, SwingKind::High),
        ]);

        assert_eq!(points.len(), 2);
        assert_eq!(labels(&points), vec![SwingLabel::HH, SwingLabel::LH]);
    }

    #[test]
    fn test_classify_keeps_index_price_and_timestamp() {
        let r = raw(7, 42.0, SwingKind::Low);
        let points = classify(vec![r]);

        assert_eq!(points[0].index, 7);
        assert_eq!(points[0].price, 42.0);
        assert_eq!(points[0].ts, r.ts);
        assert_eq!(points[0].kind, SwingKind::Low);
    }
}
