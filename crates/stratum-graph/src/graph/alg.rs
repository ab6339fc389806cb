//! Helper algorithms over [`Graph`].
//!
//! All traversals are iterative so deep chains cannot exhaust the call stack, and all results
//! are produced in a deterministic order derived from node indices and edge insertion order.

use super::{Graph, NodeIx};
use std::collections::VecDeque;

/// Depth-first preorder along out-edges, starting from each root in turn.
pub fn preorder<N, E>(g: &Graph<N, E>, roots: &[NodeIx]) -> Vec<NodeIx> {
    let mut visited = vec![false; g.node_count()];
    let mut out: Vec<NodeIx> = Vec::new();
    let mut stack: Vec<NodeIx> = Vec::new();

    for &root in roots {
        if !g.has_node(root) {
            continue;
        }
        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            out.push(v);
            // Push in reverse so the first successor is visited first.
            let succ: Vec<NodeIx> = g.successors(v).collect();
            for w in succ.into_iter().rev() {
                if !visited[w] {
                    stack.push(w);
                }
            }
        }
    }
    out
}

/// Weakly connected components. Members of each component are sorted by index and components
/// are ordered by their smallest member.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<NodeIx>> {
    let mut seen = vec![false; g.node_count()];
    let mut out: Vec<Vec<NodeIx>> = Vec::new();

    for start in g.node_ixs() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<NodeIx> = Vec::new();
        let mut q: VecDeque<NodeIx> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for w in g.successors(v).chain(g.predecessors(v)) {
                if !seen[w] {
                    seen[w] = true;
                    q.push_back(w);
                }
            }
        }
        comp.sort_unstable();
        out.push(comp);
    }

    out
}

/// `true` when [`topsort`] can order every node.
pub fn is_acyclic<N, E>(g: &Graph<N, E>) -> bool {
    topsort(g).is_some()
}

/// Kahn topological order (ready nodes taken in index order). `None` if the graph has a cycle.
pub fn topsort<N, E>(g: &Graph<N, E>) -> Option<Vec<NodeIx>> {
    let mut indegree: Vec<usize> = g.node_ixs().map(|v| g.in_edges(v).len()).collect();
    let mut ready: VecDeque<NodeIx> = g.node_ixs().filter(|&v| indegree[v] == 0).collect();
    let mut out: Vec<NodeIx> = Vec::with_capacity(g.node_count());

    while let Some(v) = ready.pop_front() {
        out.push(v);
        for w in g.successors(v) {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                ready.push_back(w);
            }
        }
    }

    (out.len() == g.node_count()).then_some(out)
}
