//! Split edges spanning several ranks into chains of unit-length edges.
//!
//! Each intermediate rank gets a zero-sized dummy node. After positioning, the dummies' centers
//! become the waypoints of the original edge.

use crate::diagram::Point;
use crate::model::{EdgeLabel, LayoutGraph, NodeLabel};
use stratum_graph::{EdgeIx, NodeIx};

#[derive(Debug, Clone, PartialEq)]
pub struct DummyChain {
    /// Index into the caller's edge list.
    pub edge: usize,
    /// The chain runs against the caller's edge direction.
    pub reversed: bool,
    /// Dummy nodes from the lower rank to the higher one.
    pub dummies: Vec<NodeIx>,
}

pub fn run(g: &mut LayoutGraph) -> Vec<DummyChain> {
    let long_edges: Vec<EdgeIx> = g
        .edges()
        .filter(|&(_, v, w, _)| {
            let v_rank = g.node(v).and_then(|n| n.rank);
            let w_rank = g.node(w).and_then(|n| n.rank);
            matches!((v_rank, w_rank), (Some(vr), Some(wr)) if wr - vr > 1)
        })
        .map(|(e, _, _, _)| e)
        .collect();

    let mut chains = Vec::with_capacity(long_edges.len());
    for e in long_edges {
        let Some((v, w)) = g.endpoints(e) else {
            continue;
        };
        let v_rank = g.node(v).and_then(|n| n.rank).unwrap_or(0);
        let w_rank = g.node(w).and_then(|n| n.rank).unwrap_or(0);
        let Some(label) = g.remove_edge(e) else {
            continue;
        };

        let segment = EdgeLabel {
            minlen: 1,
            ..label.clone()
        };
        let mut dummies = Vec::with_capacity((w_rank - v_rank - 1) as usize);
        let mut prev = v;
        for rank in (v_rank + 1)..w_rank {
            let d = g.add_node(NodeLabel {
                rank: Some(rank),
                dummy_for: Some(label.origin),
                ..NodeLabel::sized(0.0, 0.0)
            });
            g.add_edge(prev, d, segment.clone());
            dummies.push(d);
            prev = d;
        }
        g.add_edge(prev, w, segment);

        chains.push(DummyChain {
            edge: label.origin,
            reversed: label.reversed,
            dummies,
        });
    }
    chains
}

/// Collects each chain's waypoints in the caller's edge direction. Dummy nodes stay in the graph.
pub fn undo(g: &LayoutGraph, chains: &[DummyChain]) -> Vec<(usize, Vec<Point>)> {
    chains
        .iter()
        .map(|chain| {
            let mut points: Vec<Point> = chain
                .dummies
                .iter()
                .filter_map(|&d| g.node(d).and_then(NodeLabel::center))
                .collect();
            if chain.reversed {
                points.reverse();
            }
            (chain.edge, points)
        })
        .collect()
}
