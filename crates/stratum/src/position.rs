//! Coordinate assignment in top-to-bottom space.
//!
//! Y comes from stacking ranks: each rank is as tall as its tallest node and consecutive ranks
//! are `rank_sep` apart. X comes from Brandes & Köpf.

pub mod bk;

use crate::model::LayoutGraph;

pub use bk::Spacing;

pub fn position(g: &mut LayoutGraph, spacing: Spacing, rank_sep: f64) {
    position_y(g, rank_sep);
    let xs = bk::position_x(g, spacing);
    g.for_each_node_mut(|v, n| {
        if n.rank.is_some() {
            n.x = xs.get(v).copied();
        }
    });
}

fn position_y(g: &mut LayoutGraph, rank_sep: f64) {
    let layering = crate::util::build_layer_matrix(g);
    let mut prev_y = 0.0;
    for layer in &layering {
        let max_h = layer
            .iter()
            .filter_map(|&v| g.node(v))
            .map(|n| n.height)
            .fold(0.0, f64::max);
        for &v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(prev_y + max_h / 2.0);
            }
        }
        prev_y += max_h + rank_sep;
    }
}
