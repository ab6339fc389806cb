//! Helpers shared by the layout passes.

use crate::diagram::Point;
use crate::model::{LayoutGraph, Rect};
use stratum_graph::NodeIx;

/// Point where the segment from the rectangle's center towards `point` leaves the rectangle.
pub fn intersect_rect(rect: Rect, point: Point) -> Point {
    let x = rect.x;
    let y = rect.y;

    let dx = point.x - x;
    let dy = point.y - y;
    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;

    // Coincident centers have no direction; pick the right edge so the result stays finite.
    if dx == 0.0 && dy == 0.0 {
        return Point { x: x + w, y };
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };

    Point {
        x: x + sx,
        y: y + sy,
    }
}

/// Nodes grouped by rank and sorted by order. Nodes without a rank are skipped; ranks are
/// expected to be normalized (minimum 0).
pub fn build_layer_matrix(g: &LayoutGraph) -> Vec<Vec<NodeIx>> {
    let max_rank = g
        .nodes()
        .filter_map(|(_, n)| n.rank)
        .max()
        .unwrap_or(-1);
    if max_rank < 0 {
        return Vec::new();
    }

    let mut layers: Vec<Vec<(usize, NodeIx)>> = vec![Vec::new(); max_rank as usize + 1];
    for (v, n) in g.nodes() {
        let Some(rank) = n.rank else {
            continue;
        };
        let idx = rank.max(0) as usize;
        layers[idx].push((n.order.unwrap_or(usize::MAX), v));
    }

    layers
        .into_iter()
        .map(|mut layer| {
            // Stable: nodes without an order keep index order at the end of the layer.
            layer.sort_by_key(|&(order, v)| (order, v));
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect()
}

/// Shifts ranks so the smallest is 0.
pub fn normalize_ranks(g: &mut LayoutGraph) {
    let Some(min_rank) = g.nodes().filter_map(|(_, n)| n.rank).min() else {
        return;
    };
    g.for_each_node_mut(|_, n| {
        if let Some(rank) = n.rank {
            n.rank = Some(rank - min_rank);
        }
    });
}

pub fn max_rank(g: &LayoutGraph) -> Option<i32> {
    g.nodes().filter_map(|(_, n)| n.rank).max()
}
