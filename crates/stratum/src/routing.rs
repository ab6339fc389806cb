//! Edge polylines in final coordinates.

use crate::diagram::{LayoutDirection, Point};
use crate::model::Rect;
use crate::util::intersect_rect;

/// Polyline from the source boundary through `waypoints` to the target boundary. Each end is
/// clipped against its node's rectangle in the direction of the neighbouring point.
pub fn route(source: Rect, target: Rect, waypoints: &[Point]) -> Vec<Point> {
    let toward_source = waypoints.first().copied().unwrap_or(target.center());
    let toward_target = waypoints.last().copied().unwrap_or(source.center());

    let mut points = Vec::with_capacity(waypoints.len() + 2);
    points.push(intersect_rect(source, toward_source));
    points.extend_from_slice(waypoints);
    points.push(intersect_rect(target, toward_target));
    points
}

/// Loop that leaves and re-enters a node on its trailing cross-axis side: right of the node for
/// vertical layouts, below it for horizontal ones. `extent` is how far the loop reaches out.
pub fn self_loop(node: Rect, direction: LayoutDirection, extent: f64) -> Vec<Point> {
    // Shape in "rank axis" (a) / "cross axis" (i) terms, mapped back to x/y below.
    let (a, half, i) = if direction.is_horizontal() {
        (node.x, node.width / 2.0, node.y + node.height / 2.0)
    } else {
        (node.y, node.height / 2.0, node.x + node.width / 2.0)
    };
    let o = extent;
    let shape = [
        (i, a - half / 2.0),
        (i + 5.0 * o / 6.0, a - half),
        (i + o, a),
        (i + 5.0 * o / 6.0, a + half),
        (i, a + half / 2.0),
    ];

    shape
        .into_iter()
        .map(|(cross, along)| {
            if direction.is_horizontal() {
                Point::new(along, cross)
            } else {
                Point::new(cross, along)
            }
        })
        .collect()
}
