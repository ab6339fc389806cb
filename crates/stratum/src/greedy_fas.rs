//! Greedy feedback arc set selection (Eades, Lin and Smyth).
//!
//! Nodes are bucketed by `out - in` weight. Sinks and sources are peeled off first; when only
//! nodes with both kinds of edges remain, the one with the largest surplus is removed and its
//! incoming edges go into the feedback set.

use crate::model::{EdgeLabel, LayoutGraph};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::collections::hash_map::Entry;
use stratum_graph::{EdgeIx, NodeIx};

/// Feedback arc set weighted by each edge's rounded `weight`; non-finite weights count as 0.
pub fn greedy_fas(g: &LayoutGraph) -> Vec<EdgeIx> {
    greedy_fas_with_weight(g, |lbl| {
        if !lbl.weight.is_finite() {
            return 0;
        }
        lbl.weight.round() as i64
    })
}

pub fn greedy_fas_with_weight(
    g: &LayoutGraph,
    weight_fn: impl Fn(&EdgeLabel) -> i64,
) -> Vec<EdgeIx> {
    let n = g.node_count();
    if n <= 1 {
        return Vec::new();
    }

    // Parallel edges collapse into one weighted edge; adjacency keeps first-seen order.
    let mut in_w = vec![0i64; n];
    let mut out_w = vec![0i64; n];
    let mut edge_w: FxHashMap<(NodeIx, NodeIx), i64> = FxHashMap::default();
    let mut edge_order: Vec<(NodeIx, NodeIx)> = Vec::new();
    let mut max_in = 0i64;
    let mut max_out = 0i64;

    for (_, v, w, label) in g.edges() {
        if v == w {
            continue;
        }
        let wgt = weight_fn(label).max(0);
        match edge_w.entry((v, w)) {
            Entry::Vacant(slot) => {
                slot.insert(wgt);
                edge_order.push((v, w));
            }
            Entry::Occupied(mut slot) => *slot.get_mut() += wgt,
        }
        out_w[v] += wgt;
        max_out = max_out.max(out_w[v]);
        in_w[w] += wgt;
        max_in = max_in.max(in_w[w]);
    }

    let mut ins: Vec<Vec<(NodeIx, i64)>> = vec![Vec::new(); n];
    let mut outs: Vec<Vec<(NodeIx, i64)>> = vec![Vec::new(); n];
    for &(v, w) in &edge_order {
        let wgt = edge_w.get(&(v, w)).copied().unwrap_or(0);
        outs[v].push((w, wgt));
        ins[w].push((v, wgt));
    }

    let mut work = Work {
        buckets: (0..(max_out + max_in + 3).max(3) as usize)
            .map(|_| VecDeque::new())
            .collect(),
        zero_idx: max_in + 1,
        bucket_of: vec![None; n],
        alive: vec![true; n],
        alive_count: n,
        in_w,
        out_w,
        ins: &ins,
        outs: &outs,
    };
    for v in 0..n {
        work.assign_bucket(v);
    }

    let last = work.buckets.len() - 1;
    let mut results: Vec<(NodeIx, NodeIx)> = Vec::new();

    while work.alive_count > 0 {
        while let Some(v) = work.pop_bucket(0) {
            work.remove_node(v, None);
        }
        while let Some(v) = work.pop_bucket(last) {
            work.remove_node(v, None);
        }
        if work.alive_count == 0 {
            break;
        }

        let picked = (1..last).rev().find_map(|i| work.pop_bucket(i));
        let Some(v) = picked else {
            // Every live node sits in a bucket, so this only trips on inconsistent weights.
            let Some(v) = (0..n).find(|&v| work.alive[v]) else {
                break;
            };
            work.remove_node(v, None);
            continue;
        };
        work.remove_node(v, Some(&mut results));
    }

    let mut fas = Vec::new();
    for (v, w) in results {
        fas.extend(
            g.out_edges(v)
                .iter()
                .copied()
                .filter(|&e| g.endpoints(e) == Some((v, w))),
        );
    }
    fas
}

struct Work<'a> {
    buckets: Vec<VecDeque<NodeIx>>,
    zero_idx: i64,
    bucket_of: Vec<Option<usize>>,
    alive: Vec<bool>,
    alive_count: usize,
    in_w: Vec<i64>,
    out_w: Vec<i64>,
    ins: &'a [Vec<(NodeIx, i64)>],
    outs: &'a [Vec<(NodeIx, i64)>],
}

impl Work<'_> {
    fn pop_bucket(&mut self, idx: usize) -> Option<NodeIx> {
        while let Some(v) = self.buckets[idx].pop_back() {
            if self.alive[v] && self.bucket_of[v] == Some(idx) {
                return Some(v);
            }
        }
        None
    }

    fn remove_node(&mut self, v: NodeIx, predecessors: Option<&mut Vec<(NodeIx, NodeIx)>>) {
        if !self.alive[v] {
            return;
        }
        self.alive[v] = false;
        self.alive_count -= 1;
        self.bucket_of[v] = None;

        let ins = self.ins;
        let outs = self.outs;

        if let Some(preds) = predecessors {
            preds.extend(
                ins[v]
                    .iter()
                    .filter(|(u, _)| self.alive[*u])
                    .map(|&(u, _)| (u, v)),
            );
        }

        for &(u, wgt) in &ins[v] {
            if !self.alive[u] {
                continue;
            }
            self.out_w[u] -= wgt;
            self.assign_bucket(u);
        }
        for &(w, wgt) in &outs[v] {
            if !self.alive[w] {
                continue;
            }
            self.in_w[w] -= wgt;
            self.assign_bucket(w);
        }
    }

    fn assign_bucket(&mut self, v: NodeIx) {
        if let Some(prev) = self.bucket_of[v] {
            if let Some(pos) = self.buckets[prev].iter().position(|&x| x == v) {
                self.buckets[prev].remove(pos);
            }
        }

        let last = self.buckets.len() - 1;
        let idx = if self.out_w[v] == 0 {
            0
        } else if self.in_w[v] == 0 {
            last
        } else {
            (self.out_w[v] - self.in_w[v] + self.zero_idx).clamp(0, last as i64) as usize
        };

        self.buckets[idx].push_front(v);
        self.bucket_of[v] = Some(idx);
    }
}
