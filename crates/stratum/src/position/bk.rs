//! Brandes & Köpf horizontal coordinate assignment.
//!
//! Four alignments (up/down × left/right) are computed by aligning each node with the median of
//! its neighbours and compacting the resulting blocks; the final coordinate of a node is the
//! average of its two middle candidates. Every alignment keeps neighbours of a layer at least
//! `sep` apart, so the balanced result does too.

use crate::model::LayoutGraph;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map::Entry;
use stratum_graph::NodeIx;

pub type Conflicts = FxHashSet<(NodeIx, NodeIx)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub node_sep: f64,
    pub edge_sep: f64,
}

pub fn add_conflict(conflicts: &mut Conflicts, v: NodeIx, w: NodeIx) {
    conflicts.insert((v.min(w), v.max(w)));
}

pub fn has_conflict(conflicts: &Conflicts, v: NodeIx, w: NodeIx) -> bool {
    conflicts.contains(&(v.min(w), v.max(w)))
}

/// Type-1 conflicts: a non-inner segment crossing an inner segment (dummy to dummy). Inner
/// segments win, so long edges stay straight.
pub fn find_type1_conflicts(g: &LayoutGraph, layering: &[Vec<NodeIx>]) -> Conflicts {
    let mut conflicts = Conflicts::default();

    for i in 1..layering.len() {
        let prev_layer_len = layering[i - 1].len();
        let layer = &layering[i];
        let mut k0 = 0;
        let mut scan_pos = 0;

        for (idx, &v) in layer.iter().enumerate() {
            let w = find_other_inner_segment_node(g, v);
            let k1 = w
                .and_then(|w| g.node(w))
                .and_then(|n| n.order)
                .unwrap_or(prev_layer_len);

            if w.is_some() || idx + 1 == layer.len() {
                for &scan_node in &layer[scan_pos..=idx] {
                    let scan_dummy = is_dummy(g, scan_node);
                    for u in g.predecessors(scan_node) {
                        let u_pos = g.node(u).and_then(|n| n.order).unwrap_or(0);
                        if (u_pos < k0 || k1 < u_pos) && !(scan_dummy && is_dummy(g, u)) {
                            add_conflict(&mut conflicts, u, scan_node);
                        }
                    }
                }
                scan_pos = idx + 1;
                k0 = k1;
            }
        }
    }
    conflicts
}

fn find_other_inner_segment_node(g: &LayoutGraph, v: NodeIx) -> Option<NodeIx> {
    if !is_dummy(g, v) {
        return None;
    }
    g.predecessors(v).find(|&u| is_dummy(g, u))
}

fn is_dummy(g: &LayoutGraph, v: NodeIx) -> bool {
    g.node(v).is_some_and(|n| n.is_dummy())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Block root of every node.
    pub root: Vec<NodeIx>,
    /// Next node of the block (cyclic; the last one points back at the root).
    pub align: Vec<NodeIx>,
}

pub fn vertical_alignment<F, I>(
    node_count: usize,
    layering: &[Vec<NodeIx>],
    conflicts: &Conflicts,
    neighbors: F,
) -> Alignment
where
    F: Fn(NodeIx) -> I,
    I: Iterator<Item = NodeIx>,
{
    let mut root: Vec<NodeIx> = (0..node_count).collect();
    let mut align: Vec<NodeIx> = (0..node_count).collect();
    let mut pos: Vec<usize> = vec![usize::MAX; node_count];
    for layer in layering {
        for (order, &v) in layer.iter().enumerate() {
            pos[v] = order;
        }
    }

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for &v in layer {
            let mut ws: Vec<NodeIx> = neighbors(v).collect();
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|&w| (pos[w], w));
            ws.dedup();

            let mp = (ws.len() - 1) as f64 / 2.0;
            let i0 = mp.floor() as usize;
            let i1 = mp.ceil() as usize;
            for &w in &ws[i0..=i1] {
                if align[v] == v
                    && prev_idx.is_none_or(|p| p < pos[w])
                    && !has_conflict(conflicts, v, w)
                {
                    align[w] = v;
                    align[v] = root[w];
                    root[v] = root[w];
                    prev_idx = Some(pos[w]);
                }
            }
        }
    }

    Alignment { root, align }
}

/// Block graph: one node per block root, an edge `u -> v` whenever some node of block `u` sits
/// directly left of a node of block `v`, weighted by the largest separation required.
struct BlockGraph {
    nodes: Vec<NodeIx>,
    ins: FxHashMap<NodeIx, Vec<(NodeIx, f64)>>,
    outs: FxHashMap<NodeIx, Vec<(NodeIx, f64)>>,
}

impl BlockGraph {
    fn build(
        g: &LayoutGraph,
        layering: &[Vec<NodeIx>],
        root: &[NodeIx],
        spacing: Spacing,
    ) -> Self {
        let mut nodes: Vec<NodeIx> = Vec::new();
        let mut seen: FxHashSet<NodeIx> = FxHashSet::default();
        let mut edge_ix: FxHashMap<(NodeIx, NodeIx), usize> = FxHashMap::default();
        let mut edges: Vec<(NodeIx, NodeIx, f64)> = Vec::new();

        for layer in layering {
            let mut u: Option<NodeIx> = None;
            for &v in layer {
                let v_root = root[v];
                if seen.insert(v_root) {
                    nodes.push(v_root);
                }
                if let Some(u) = u {
                    let u_root = root[u];
                    let sep = sep(g, v, u, spacing);
                    match edge_ix.entry((u_root, v_root)) {
                        Entry::Occupied(slot) => {
                            let edge = &mut edges[*slot.get()];
                            edge.2 = edge.2.max(sep);
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(edges.len());
                            edges.push((u_root, v_root, sep));
                        }
                    }
                }
                u = Some(v);
            }
        }

        let mut ins: FxHashMap<NodeIx, Vec<(NodeIx, f64)>> = FxHashMap::default();
        let mut outs: FxHashMap<NodeIx, Vec<(NodeIx, f64)>> = FxHashMap::default();
        for (u, v, w) in edges {
            outs.entry(u).or_default().push((v, w));
            ins.entry(v).or_default().push((u, w));
        }
        Self { nodes, ins, outs }
    }

    fn in_edges(&self, v: NodeIx) -> &[(NodeIx, f64)] {
        self.ins.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    fn out_edges(&self, v: NodeIx) -> &[(NodeIx, f64)] {
        self.outs.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Visits every block after the blocks `next` returns for it, starting from all blocks.
    fn iterate(&self, mut set_xs: impl FnMut(NodeIx), next: impl Fn(NodeIx) -> Vec<NodeIx>) {
        let mut stack: Vec<NodeIx> = self.nodes.clone();
        let mut visited: FxHashSet<NodeIx> = FxHashSet::default();
        while let Some(elem) = stack.pop() {
            if !visited.insert(elem) {
                set_xs(elem);
                continue;
            }
            stack.push(elem);
            stack.extend(next(elem));
        }
    }
}

pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Vec<NodeIx>],
    alignment: &Alignment,
    spacing: Spacing,
) -> Vec<f64> {
    let block_g = BlockGraph::build(g, layering, &alignment.root, spacing);
    let mut xs: FxHashMap<NodeIx, f64> = FxHashMap::default();

    // Smallest coordinates: as far left as the blocks on the left allow.
    block_g.iterate(
        |elem| {
            let best = block_g
                .in_edges(elem)
                .iter()
                .map(|&(u, w)| xs.get(&u).copied().unwrap_or(0.0) + w)
                .fold(0.0, f64::max);
            xs.insert(elem, best);
        },
        |elem| block_g.in_edges(elem).iter().map(|&(u, _)| u).collect(),
    );

    // Pull blocks right towards their right neighbours where there is slack.
    block_g.iterate(
        |elem| {
            let min = block_g
                .out_edges(elem)
                .iter()
                .map(|&(v, w)| xs.get(&v).copied().unwrap_or(0.0) - w)
                .fold(f64::INFINITY, f64::min);
            if min.is_finite() {
                let cur = xs.get(&elem).copied().unwrap_or(0.0);
                xs.insert(elem, cur.max(min));
            }
        },
        |elem| block_g.out_edges(elem).iter().map(|&(v, _)| v).collect(),
    );

    (0..g.node_count())
        .map(|v| xs.get(&alignment.root[v]).copied().unwrap_or(0.0))
        .collect()
}

fn sep(g: &LayoutGraph, v: NodeIx, w: NodeIx, spacing: Spacing) -> f64 {
    let half_gap = |x: NodeIx| {
        if is_dummy(g, x) {
            spacing.edge_sep / 2.0
        } else {
            spacing.node_sep / 2.0
        }
    };
    width(g, v) / 2.0 + half_gap(v) + half_gap(w) + width(g, w) / 2.0
}

fn width(g: &LayoutGraph, v: NodeIx) -> f64 {
    g.node(v).map(|n| n.width).unwrap_or(0.0)
}

/// Alignment order: up-left, up-right, down-left, down-right.
const ALIGNMENTS: [(bool, bool); 4] = [
    (true, false),
    (true, true),
    (false, false),
    (false, true),
];

pub fn find_smallest_width_alignment(
    g: &LayoutGraph,
    xss: &[Vec<f64>],
    ranked: &[NodeIx],
) -> usize {
    let mut best_width = f64::INFINITY;
    let mut best = 0;
    for (i, xs) in xss.iter().enumerate() {
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for &v in ranked {
            let half_w = width(g, v) / 2.0;
            max = max.max(xs[v] + half_w);
            min = min.min(xs[v] - half_w);
        }
        let w = max - min;
        if w < best_width {
            best_width = w;
            best = i;
        }
    }
    best
}

/// Shifts the left alignments so their minimum matches `align_to`'s, and the right ones so their
/// maximum does.
pub fn align_coordinates(xss: &mut [Vec<f64>], align_to: usize, ranked: &[NodeIx]) {
    let bounds = |xs: &[f64]| {
        ranked
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(xs[v]), hi.max(xs[v]))
            })
    };
    let (to_min, to_max) = bounds(&xss[align_to]);

    for (i, &(_, right)) in ALIGNMENTS.iter().enumerate() {
        if i == align_to || i >= xss.len() {
            continue;
        }
        let (xs_min, xs_max) = bounds(&xss[i]);
        let delta = if right { to_max - xs_max } else { to_min - xs_min };
        if delta != 0.0 && delta.is_finite() {
            for &v in ranked {
                xss[i][v] += delta;
            }
        }
    }
}

/// Mean of the two middle candidates per node.
pub fn balance(xss: &[Vec<f64>], ranked: &[NodeIx], node_count: usize) -> Vec<f64> {
    let mut out = vec![0.0; node_count];
    for &v in ranked {
        let mut vals: Vec<f64> = xss.iter().map(|xs| xs[v]).collect();
        vals.sort_by(f64::total_cmp);
        out[v] = match vals.len() {
            0 => 0.0,
            n if n >= 4 => (vals[1] + vals[2]) / 2.0,
            n => vals[n / 2],
        };
    }
    out
}

/// X coordinate (in top-to-bottom space) of every ranked node, indexed by node.
pub fn position_x(g: &LayoutGraph, spacing: Spacing) -> Vec<f64> {
    let layering = crate::util::build_layer_matrix(g);
    let ranked: Vec<NodeIx> = layering.iter().flatten().copied().collect();
    let conflicts = find_type1_conflicts(g, &layering);
    let n = g.node_count();

    let mut xss: Vec<Vec<f64>> = Vec::with_capacity(ALIGNMENTS.len());
    for (up, right) in ALIGNMENTS {
        let mut adjusted: Vec<Vec<NodeIx>> = if up {
            layering.clone()
        } else {
            layering.iter().rev().cloned().collect()
        };
        if right {
            for layer in &mut adjusted {
                layer.reverse();
            }
        }

        let alignment = if up {
            vertical_alignment(n, &adjusted, &conflicts, |v| g.predecessors(v))
        } else {
            vertical_alignment(n, &adjusted, &conflicts, |v| g.successors(v))
        };
        let mut xs = horizontal_compaction(g, &adjusted, &alignment, spacing);
        if right {
            for x in &mut xs {
                *x = -*x;
            }
        }
        xss.push(xs);
    }

    let smallest = find_smallest_width_alignment(g, &xss, &ranked);
    align_coordinates(&mut xss, smallest, &ranked);
    balance(&xss, &ranked, n)
}
