//! Barycenter heuristic for one layer.

use crate::model::LayoutGraph;
use stratum_graph::NodeIx;

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: NodeIx,
    /// Position in the layer before sorting.
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Weighted mean order of each node's neighbours on the fixed side: predecessors when sweeping
/// down, successors when sweeping up. Nodes without such neighbours get no barycenter.
pub fn barycenter(g: &LayoutGraph, movable: &[NodeIx], down: bool) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let edges = if down { g.in_edges(v) } else { g.out_edges(v) };
            let mut sum = 0.0;
            let mut weight = 0.0;
            let mut saw_edge = false;
            for &e in edges {
                let (Some((tail, head)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
                    continue;
                };
                let u = if down { tail } else { head };
                let order = g.node(u).and_then(|n| n.order).unwrap_or(0) as f64;
                sum += label.weight * order;
                weight += label.weight;
                saw_edge = true;
            }

            if !saw_edge || weight == 0.0 {
                return BarycenterEntry {
                    v,
                    i,
                    barycenter: None,
                    weight: None,
                };
            }
            BarycenterEntry {
                v,
                i,
                barycenter: Some(sum / weight),
                weight: Some(weight),
            }
        })
        .collect()
}

/// Orders a layer by barycenter. Ties fall back to the previous position (reversed when
/// `bias_right`), and nodes without a barycenter keep their previous slot.
pub fn sort(entries: &[BarycenterEntry], bias_right: bool) -> Vec<NodeIx> {
    let (mut sortable, mut unsortable): (Vec<&BarycenterEntry>, Vec<&BarycenterEntry>) =
        entries.iter().partition(|e| e.barycenter.is_some());

    // Popped from the back, so keep the smallest previous position last.
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let a_bc = a.barycenter.unwrap_or(0.0);
        let b_bc = b.barycenter.unwrap_or(0.0);
        a_bc.total_cmp(&b_bc).then_with(|| {
            if bias_right {
                b.i.cmp(&a.i)
            } else {
                a.i.cmp(&b.i)
            }
        })
    });

    let mut out: Vec<NodeIx> = Vec::with_capacity(entries.len());
    consume_unsortable(&mut out, &mut unsortable);
    for entry in sortable {
        out.push(entry.v);
        consume_unsortable(&mut out, &mut unsortable);
    }
    out
}

fn consume_unsortable(out: &mut Vec<NodeIx>, unsortable: &mut Vec<&BarycenterEntry>) {
    while let Some(last) = unsortable.last() {
        if last.i > out.len() {
            break;
        }
        out.push(last.v);
        unsortable.pop();
    }
}
