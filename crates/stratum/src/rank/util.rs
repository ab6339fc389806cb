//! Rank helpers (simplified rank graph, longest path, slack).

use crate::model::LayoutGraph;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use stratum_graph::{EdgeIx, NodeIx};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RankEdge {
    pub v: usize,
    pub w: usize,
    pub weight: f64,
    pub minlen: i32,
}

/// Simple graph over a subset of layout nodes, addressed by local indices `0..len()`.
///
/// Parallel edges are merged (weights summed, largest `minlen` kept) and self-loops dropped, which
/// is all ranking needs.
#[derive(Debug, Clone, Default)]
pub(crate) struct RankGraph {
    /// Local index -> layout node.
    pub members: Vec<NodeIx>,
    pub edges: Vec<RankEdge>,
    /// Per local node: out-edges followed by in-edges.
    pub incident: Vec<Vec<usize>>,
    pub out: Vec<Vec<usize>>,
    pub rank: Vec<i32>,
}

impl RankGraph {
    pub fn new(g: &LayoutGraph, members: &[NodeIx]) -> Self {
        let local: FxHashMap<NodeIx, usize> = members
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();

        let mut edges: Vec<RankEdge> = Vec::new();
        let mut merged: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        for (_, v, w, label) in g.edges() {
            let (Some(&lv), Some(&lw)) = (local.get(&v), local.get(&w)) else {
                continue;
            };
            if lv == lw {
                continue;
            }
            let minlen = label.minlen as i32;
            match merged.entry((lv, lw)) {
                Entry::Occupied(slot) => {
                    let edge = &mut edges[*slot.get()];
                    edge.weight += label.weight;
                    edge.minlen = edge.minlen.max(minlen);
                }
                Entry::Vacant(slot) => {
                    slot.insert(edges.len());
                    edges.push(RankEdge {
                        v: lv,
                        w: lw,
                        weight: label.weight,
                        minlen,
                    });
                }
            }
        }

        let n = members.len();
        let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut ins: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (e, edge) in edges.iter().enumerate() {
            out[edge.v].push(e);
            ins[edge.w].push(e);
        }
        let incident = out
            .iter()
            .zip(ins)
            .map(|(o, i)| o.iter().copied().chain(i).collect())
            .collect();

        Self {
            members: members.to_vec(),
            edges,
            incident,
            out,
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn load_ranks(&mut self, g: &LayoutGraph) {
        for (i, &v) in self.members.iter().enumerate() {
            self.rank[i] = g.node(v).and_then(|n| n.rank).unwrap_or(0);
        }
    }

    pub fn store_ranks(&self, g: &mut LayoutGraph) {
        for (i, &v) in self.members.iter().enumerate() {
            if let Some(label) = g.node_mut(v) {
                label.rank = Some(self.rank[i]);
            }
        }
    }

    pub fn slack(&self, e: usize) -> i32 {
        let edge = &self.edges[e];
        self.rank[edge.w] - self.rank[edge.v] - edge.minlen
    }

    /// Places every node as low as its successors allow: sinks at 0, everything else at
    /// `min(rank(w) - minlen)` over its out-edges.
    pub fn longest_path(&mut self) {
        let n = self.len();
        let mut pending_out: Vec<usize> = self.out.iter().map(Vec::len).collect();
        let mut ins: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (e, edge) in self.edges.iter().enumerate() {
            ins[edge.w].push(e);
        }

        // Reverse topological order: sinks first.
        let mut ready: Vec<usize> = (0..n).rev().filter(|&v| pending_out[v] == 0).collect();
        let mut done = vec![false; n];
        while let Some(v) = ready.pop() {
            done[v] = true;
            self.rank[v] = self.out[v]
                .iter()
                .map(|&e| self.rank[self.edges[e].w] - self.edges[e].minlen)
                .min()
                .unwrap_or(0);
            for &e in &ins[v] {
                let u = self.edges[e].v;
                pending_out[u] -= 1;
                if pending_out[u] == 0 {
                    ready.push(u);
                }
            }
        }

        // Only reachable on cyclic input; keep those nodes on rank 0.
        for v in 0..n {
            if !done[v] {
                self.rank[v] = 0;
            }
        }
    }
}

/// Longest-path ranking over the whole graph. Ranks are not normalized.
pub fn longest_path(g: &mut LayoutGraph) {
    let members: Vec<NodeIx> = g.node_ixs().collect();
    let mut rg = RankGraph::new(g, &members);
    rg.longest_path();
    rg.store_ranks(g);
}

/// `rank(w) - rank(v) - minlen` for edge `e`. Missing ranks count as 0.
pub fn slack(g: &LayoutGraph, e: EdgeIx) -> Option<i32> {
    let (v, w) = g.endpoints(e)?;
    let minlen = g.edge(e)?.minlen as i32;
    let v_rank = g.node(v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(w).and_then(|n| n.rank).unwrap_or(0);
    Some(w_rank - v_rank - minlen)
}
