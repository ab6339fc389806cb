//! Rank assignment (network simplex, tight tree, longest path).
//!
//! Expects an acyclic graph. Afterwards every node has a rank, every edge satisfies
//! `rank(w) - rank(v) >= minlen`, and the smallest rank is 0.

pub mod feasible_tree;
pub mod network_simplex;
pub mod util;

use crate::config::Ranker;
use crate::model::LayoutGraph;

pub fn rank(g: &mut LayoutGraph, ranker: Ranker) {
    if g.edge_count() == 0 {
        g.for_each_node_mut(|_, n| n.rank = Some(0));
        return;
    }

    match ranker {
        Ranker::NetworkSimplex => network_simplex::network_simplex(g),
        Ranker::TightTree => {
            util::longest_path(g);
            feasible_tree::feasible_tree(g);
        }
        Ranker::LongestPath => util::longest_path(g),
    }
    crate::util::normalize_ranks(g);
}

/// Edges whose rank span is shorter than their `minlen`.
pub fn violations(g: &LayoutGraph) -> usize {
    g.edges()
        .filter(|&(e, v, w, _)| v != w && util::slack(g, e).is_none_or(|s| s < 0))
        .count()
}
