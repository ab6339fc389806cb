//! Feasible tight spanning tree.
//!
//! Starting from a feasible ranking (every edge has slack >= 0), grow a tree of tight edges from
//! the first node. Whenever the tree cannot grow, shift it by the smallest slack of an edge
//! leaving it; that edge becomes tight and the tree keeps growing.

use super::util::RankGraph;
use crate::model::LayoutGraph;
use stratum_graph::alg;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub(crate) struct TightTree {
    pub in_tree: Vec<bool>,
    /// Per rank-graph edge.
    pub tree_edge: Vec<bool>,
    /// Tree nodes in insertion order.
    pub nodes: Vec<usize>,
}

impl TightTree {
    fn add(&mut self, v: usize) {
        self.in_tree[v] = true;
        self.nodes.push(v);
    }

    pub fn spans(&self, rg: &RankGraph) -> bool {
        self.nodes.len() == rg.len()
    }
}

/// Builds a tight tree over `rg`, which must be connected. Shifts `rg.rank` as needed.
pub(crate) fn tight_tree(rg: &mut RankGraph) -> TightTree {
    let n = rg.len();
    let mut tree = TightTree {
        in_tree: vec![false; n],
        tree_edge: vec![false; rg.edges.len()],
        nodes: Vec::with_capacity(n),
    };
    if n == 0 {
        return tree;
    }
    tree.add(0);

    loop {
        grow(rg, &mut tree);
        if tree.nodes.len() >= n {
            break;
        }

        let mut best: Option<(i32, usize)> = None;
        for (e, edge) in rg.edges.iter().enumerate() {
            if tree.in_tree[edge.v] == tree.in_tree[edge.w] {
                continue;
            }
            let slack = rg.slack(e);
            if best.is_none_or(|(s, _)| slack < s) {
                best = Some((slack, e));
            }
        }
        let Some((slack, e)) = best else {
            break;
        };

        let delta = if tree.in_tree[rg.edges[e].v] {
            slack
        } else {
            -slack
        };
        for &v in &tree.nodes {
            rg.rank[v] += delta;
        }
    }
    tree
}

fn grow(rg: &RankGraph, tree: &mut TightTree) {
    let mut stack: Vec<usize> = tree.nodes.clone();
    while let Some(v) = stack.pop() {
        for &e in &rg.incident[v] {
            let edge = rg.edges[e];
            let w = if edge.v == v { edge.w } else { edge.v };
            if tree.in_tree[w] || rg.slack(e) != 0 {
                continue;
            }
            tree.add(w);
            tree.tree_edge[e] = true;
            stack.push(w);
        }
    }
}

/// Tightens the current ranking of every connected component so each one is spanned by a tree of
/// tight edges. Expects ranks that are already feasible, e.g. from [`super::util::longest_path`].
pub fn feasible_tree(g: &mut LayoutGraph) {
    for component in alg::components(g) {
        let mut rg = RankGraph::new(g, &component);
        rg.load_ranks(g);
        let tree = tight_tree(&mut rg);
        if !tree.spans(&rg) {
            debug!(
                nodes = rg.len(),
                tree = tree.nodes.len(),
                "tight tree does not span its component"
            );
        }
        rg.store_ranks(g);
    }
}
