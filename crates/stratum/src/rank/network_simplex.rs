//! Network simplex ranker.
//!
//! Minimizes `sum(weight * length)` over all edges subject to `length >= minlen`, following
//! Gansner et al., "A Technique for Drawing Directed Graphs". Each connected component is solved on
//! its own simplified [`RankGraph`] with a spanning tree kept in flat, locally indexed arrays.

use super::feasible_tree::{TightTree, tight_tree};
use super::util::{RankEdge, RankGraph};
use crate::model::LayoutGraph;
use stratum_graph::alg;
use tracing::debug;

#[derive(Debug, Clone)]
struct TreeState {
    root: usize,
    /// Tree edges incident to each node.
    adj: Vec<Vec<usize>>,
    tree_edge: Vec<bool>,
    parent: Vec<Option<usize>>,
    parent_edge: Vec<Option<usize>>,
    low: Vec<i32>,
    lim: Vec<i32>,
    /// Cut value of the tree edge between a node and its parent (0 for the root).
    cut: Vec<f64>,
    preorder: Vec<usize>,
    postorder: Vec<usize>,
}

impl TreeState {
    fn new(rg: &RankGraph, tree: TightTree) -> Self {
        let n = rg.len();
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (e, edge) in rg.edges.iter().enumerate() {
            if tree.tree_edge[e] {
                adj[edge.v].push(e);
                adj[edge.w].push(e);
            }
        }
        let mut state = Self {
            root: 0,
            adj,
            tree_edge: tree.tree_edge,
            parent: vec![None; n],
            parent_edge: vec![None; n],
            low: vec![0; n],
            lim: vec![0; n],
            cut: vec![0.0; n],
            preorder: Vec::with_capacity(n),
            postorder: Vec::with_capacity(n),
        };
        state.init_low_lim(rg);
        state.init_cut_values(rg);
        state
    }

    /// Postorder numbering: `lim` is a node's own number, `low` the smallest number in its
    /// subtree, so `u` lies under `v` iff `low[v] <= lim[u] <= lim[v]`.
    fn init_low_lim(&mut self, rg: &RankGraph) {
        self.preorder.clear();
        self.postorder.clear();
        self.parent[self.root] = None;
        self.parent_edge[self.root] = None;

        let mut next_lim = 1;
        let mut stack: Vec<(usize, usize)> = vec![(self.root, 0)];
        self.low[self.root] = next_lim;
        self.preorder.push(self.root);

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let Some(&e) = self.adj[v].get(top.1) else {
                self.lim[v] = next_lim;
                next_lim += 1;
                self.postorder.push(v);
                stack.pop();
                continue;
            };
            top.1 += 1;
            if self.parent_edge[v] == Some(e) {
                continue;
            }
            let edge = rg.edges[e];
            let w = if edge.v == v { edge.w } else { edge.v };
            self.parent[w] = Some(v);
            self.parent_edge[w] = Some(e);
            self.low[w] = next_lim;
            self.preorder.push(w);
            stack.push((w, 0));
        }
    }

    fn init_cut_values(&mut self, rg: &RankGraph) {
        for i in 0..self.postorder.len() {
            let v = self.postorder[i];
            if v != self.root {
                self.cut[v] = self.calc_cut_value(rg, v);
            }
        }
        self.cut[self.root] = 0.0;
    }

    /// Cut value of the tree edge between `child` and its parent. Children of `child` must
    /// already have their cut values.
    fn calc_cut_value(&self, rg: &RankGraph, child: usize) -> f64 {
        let (Some(parent), Some(te)) = (self.parent[child], self.parent_edge[child]) else {
            return 0.0;
        };
        let child_is_tail = rg.edges[te].v == child;
        let mut cut = rg.edges[te].weight;

        for &e in &rg.incident[child] {
            let edge = rg.edges[e];
            let is_out = edge.v == child;
            let other = if is_out { edge.w } else { edge.v };
            if other == parent {
                continue;
            }
            let points_to_head = is_out == child_is_tail;
            cut += if points_to_head {
                edge.weight
            } else {
                -edge.weight
            };
            if self.tree_edge[e] {
                let other_cut = self.cut[other];
                cut += if points_to_head {
                    -other_cut
                } else {
                    other_cut
                };
            }
        }
        cut
    }

    fn is_descendant(&self, v: usize, root: usize) -> bool {
        self.low[root] <= self.lim[v] && self.lim[v] <= self.lim[root]
    }

    /// First tree edge (in edge order) with a negative cut value.
    fn leave_edge(&self, rg: &RankGraph) -> Option<usize> {
        (0..rg.edges.len()).find(|&e| {
            if !self.tree_edge[e] {
                return false;
            }
            let edge = rg.edges[e];
            let child = if self.parent_edge[edge.v] == Some(e) {
                edge.v
            } else {
                edge.w
            };
            self.cut[child] < 0.0
        })
    }

    /// Non-tree edge with the smallest slack that reconnects the two halves left after removing
    /// `leaving`, crossing in the opposite direction.
    fn enter_edge(&self, rg: &RankGraph, leaving: usize) -> Option<usize> {
        let RankEdge { v, w, .. } = rg.edges[leaving];
        let (tail, flip) = if self.lim[v] > self.lim[w] {
            (w, true)
        } else {
            (v, false)
        };

        let mut best: Option<(i32, usize)> = None;
        for (e, edge) in rg.edges.iter().enumerate() {
            if flip != self.is_descendant(edge.v, tail) || flip == self.is_descendant(edge.w, tail)
            {
                continue;
            }
            let slack = rg.slack(e);
            if best.is_none_or(|(s, _)| slack < s) {
                best = Some((slack, e));
            }
        }
        best.map(|(_, e)| e)
    }

    fn exchange(&mut self, rg: &mut RankGraph, leaving: usize, entering: usize) {
        let old = rg.edges[leaving];
        self.tree_edge[leaving] = false;
        self.adj[old.v].retain(|&e| e != leaving);
        self.adj[old.w].retain(|&e| e != leaving);

        let new = rg.edges[entering];
        self.tree_edge[entering] = true;
        self.adj[new.v].push(entering);
        self.adj[new.w].push(entering);

        self.init_low_lim(rg);
        self.init_cut_values(rg);
        self.update_ranks(rg);
    }

    /// Re-derives ranks from the root so every tree edge is tight.
    fn update_ranks(&self, rg: &mut RankGraph) {
        for &v in self.preorder.iter().skip(1) {
            let (Some(parent), Some(e)) = (self.parent[v], self.parent_edge[v]) else {
                continue;
            };
            let edge = rg.edges[e];
            rg.rank[v] = if edge.v == v {
                rg.rank[parent] - edge.minlen
            } else {
                rg.rank[parent] + edge.minlen
            };
        }
    }
}

/// Pivot budget per component; generous enough that it only trips on pathological inputs.
fn max_pivots(rg: &RankGraph) -> usize {
    (rg.len() + rg.edges.len()) * 8 + 64
}

/// Runs network simplex on one connected set of nodes. Ranks start from longest path.
pub(crate) fn solve(rg: &mut RankGraph) {
    rg.longest_path();
    let tree = tight_tree(rg);
    if !tree.spans(rg) {
        debug!(
            nodes = rg.len(),
            tree = tree.nodes.len(),
            "rank graph is not connected; keeping longest-path ranks"
        );
        return;
    }

    let mut state = TreeState::new(rg, tree);
    let budget = max_pivots(rg);
    let mut pivots = 0;
    while let Some(leaving) = state.leave_edge(rg) {
        if pivots >= budget {
            debug!(pivots, "network simplex pivot budget exhausted");
            break;
        }
        let Some(entering) = state.enter_edge(rg, leaving) else {
            break;
        };
        state.exchange(rg, leaving, entering);
        pivots += 1;
    }
}

/// Network simplex over every connected component of `g`. Ranks are not normalized.
pub fn network_simplex(g: &mut LayoutGraph) {
    for component in alg::components(g) {
        let mut rg = RankGraph::new(g, &component);
        solve(&mut rg);
        rg.store_ranks(g);
    }
}
