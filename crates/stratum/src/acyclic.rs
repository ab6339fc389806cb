//! Break cycles by reversing a feedback arc set (FAS).
//!
//! Reversed edges keep their index and label and are flagged with `reversed`, so `undo` can put
//! them back once ranks and coordinates exist.

use crate::config::Acyclicer;
use crate::model::LayoutGraph;
use stratum_graph::{EdgeIx, NodeIx};

/// Reverses a feedback arc set so the graph becomes acyclic. Self-loops are left alone.
/// Returns the number of reversed edges.
pub fn run(g: &mut LayoutGraph, acyclicer: Acyclicer) -> usize {
    let fas = match acyclicer {
        Acyclicer::Greedy => crate::greedy_fas::greedy_fas(g),
        Acyclicer::Dfs => dfs_fas(g),
    };

    let mut reversed = 0;
    for e in fas {
        let Some((v, w)) = g.endpoints(e) else {
            continue;
        };
        if v == w {
            continue;
        }
        if g.reverse_edge(e) {
            if let Some(label) = g.edge_mut(e) {
                label.reversed = !label.reversed;
            }
            reversed += 1;
        }
    }
    reversed
}

/// Restores the original direction of every edge `run` reversed.
pub fn undo(g: &mut LayoutGraph) {
    let flipped: Vec<EdgeIx> = g
        .edges()
        .filter(|(_, _, _, lbl)| lbl.reversed)
        .map(|(e, _, _, _)| e)
        .collect();
    for e in flipped {
        g.reverse_edge(e);
        if let Some(label) = g.edge_mut(e) {
            label.reversed = false;
        }
    }
}

/// Back edges of a depth-first search started from every node in index order.
pub fn dfs_fas(g: &LayoutGraph) -> Vec<EdgeIx> {
    let n = g.node_count();
    let mut fas: Vec<EdgeIx> = Vec::new();
    let mut visited = vec![false; n];
    let mut on_stack = vec![false; n];

    // (node, position in its out-edge list)
    let mut stack: Vec<(NodeIx, usize)> = Vec::new();

    for root in g.node_ixs() {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        on_stack[root] = true;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let out = g.out_edges(v);
            let Some(&e) = out.get(top.1) else {
                on_stack[v] = false;
                stack.pop();
                continue;
            };
            top.1 += 1;

            let Some((_, w)) = g.endpoints(e) else {
                continue;
            };
            if w == v {
                continue;
            }
            if on_stack[w] {
                fas.push(e);
            } else if !visited[w] {
                visited[w] = true;
                on_stack[w] = true;
                stack.push((w, 0));
            }
        }
    }
    fas
}
