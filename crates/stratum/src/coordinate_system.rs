//! Axis handling for the four layout directions.
//!
//! Ranking and positioning always work top-to-bottom. Horizontal directions swap node
//! width/height before and swap axes back afterwards; reversed directions mirror the rank axis.

use crate::diagram::LayoutDirection;
use crate::model::LayoutGraph;

pub fn adjust(g: &mut LayoutGraph, direction: LayoutDirection) {
    if direction.is_horizontal() {
        swap_width_height(g);
    }
}

pub fn undo(g: &mut LayoutGraph, direction: LayoutDirection) {
    if direction.is_reversed() {
        reverse_y(g);
    }
    if direction.is_horizontal() {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height(g: &mut LayoutGraph) {
    g.for_each_node_mut(|_, n| {
        (n.width, n.height) = (n.height, n.width);
    });
}

fn reverse_y(g: &mut LayoutGraph) {
    g.for_each_node_mut(|_, n| {
        if let Some(y) = n.y {
            n.y = Some(-y);
        }
    });
}

fn swap_xy(g: &mut LayoutGraph) {
    g.for_each_node_mut(|_, n| {
        (n.x, n.y) = (n.y, n.x);
    });
}
