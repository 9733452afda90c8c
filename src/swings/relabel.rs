use super::classify::LabelState;
use super::point::SwingPoint;

/// Re-derive every label in chronological order against the nearest
/// preceding point of the same kind.
///
/// Only `label` changes. Idempotent.
pub fn relabel(mut points: Vec<SwingPoint>) -> Vec<SwingPoint> {
    // Stable, so a high and a low on the same outside bar keep their order.
    points.sort_by_key(|p| p.index);

    let mut state = LabelState::default();
    for point in points.iter_mut() {
        point.label = state.label_for(point.kind, point.price);
        state.record(*point);
    }

    points
}
