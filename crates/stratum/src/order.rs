//! Crossing reduction.
//!
//! Starting from a depth-first initial order, alternate downward and upward barycenter sweeps
//! and keep the layering with the fewest weighted crossings. Stops after four sweeps without
//! improvement or after `max_sweeps` sweeps, whichever comes first.

pub mod barycenter;
pub mod cross_count;
pub mod init_order;

use crate::model::LayoutGraph;
use stratum_graph::NodeIx;
use tracing::debug;

/// Sweeps without improvement before ordering stops.
const STALL_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStats {
    pub sweeps: usize,
    pub crossings: f64,
}

pub fn order(g: &mut LayoutGraph, max_sweeps: usize) -> OrderStats {
    let mut layering = init_order::init_order(g);
    assign_order(g, &layering);

    let mut best_cc = cross_count::cross_count(g, &layering);
    let mut best = layering.clone();
    let mut sweeps = 0;
    let mut last_best = 0;

    while last_best < STALL_LIMIT && sweeps < max_sweeps && best_cc > 0.0 {
        let down = sweeps % 2 == 1;
        let bias_right = sweeps % 4 >= 2;
        sweep(g, &mut layering, down, bias_right);

        let cc = cross_count::cross_count(g, &layering);
        sweeps += 1;
        last_best += 1;
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best.clone_from(&layering);
        }
    }

    assign_order(g, &best);
    debug!(sweeps, crossings = best_cc, "ordered layers");
    OrderStats {
        sweeps,
        crossings: best_cc,
    }
}

/// Reorders every layer against its already-placed neighbour layer.
fn sweep(g: &mut LayoutGraph, layering: &mut [Vec<NodeIx>], down: bool, bias_right: bool) {
    let ranks: Vec<usize> = if down {
        (1..layering.len()).collect()
    } else {
        (0..layering.len().saturating_sub(1)).rev().collect()
    };
    for r in ranks {
        let entries = barycenter::barycenter(g, &layering[r], down);
        let sorted = barycenter::sort(&entries, bias_right);
        for (i, &v) in sorted.iter().enumerate() {
            if let Some(label) = g.node_mut(v) {
                label.order = Some(i);
            }
        }
        layering[r] = sorted;
    }
}

fn assign_order(g: &mut LayoutGraph, layering: &[Vec<NodeIx>]) {
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            if let Some(label) = g.node_mut(v) {
                label.order = Some(i);
            }
        }
    }
}
