//! Arena-indexed directed multigraph.
//!
//! Parallel edges and self-loops are allowed. Nodes are never removed (layout passes only add
//! dummy nodes), while edges can be removed (tombstoned) or reversed in place.

pub mod alg;
mod entries;

use entries::{EdgeEntry, NodeEntry};

/// Index of a node in a [`Graph`].
pub type NodeIx = usize;
/// Index of an edge in a [`Graph`]. Stable across removals of other edges.
pub type EdgeIx = usize;

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<NodeEntry<N>>,
    edges: Vec<Option<EdgeEntry<E>>>,
    live_edges: usize,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            live_edges: 0,
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            live_edges: 0,
        }
    }

    pub fn add_node(&mut self, label: N) -> NodeIx {
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            label,
            out: Vec::new(),
            in_: Vec::new(),
        });
        ix
    }

    /// Adds an edge `v -> w`. Returns `None` (and stores nothing) if either endpoint is unknown.
    pub fn add_edge(&mut self, v: NodeIx, w: NodeIx, label: E) -> Option<EdgeIx> {
        if v >= self.nodes.len() || w >= self.nodes.len() {
            return None;
        }
        let ix = self.edges.len();
        self.edges.push(Some(EdgeEntry { v, w, label }));
        self.nodes[v].out.push(ix);
        self.nodes[w].in_.push(ix);
        self.live_edges += 1;
        Some(ix)
    }

    pub fn remove_edge(&mut self, e: EdgeIx) -> Option<E> {
        let entry = self.edges.get_mut(e)?.take()?;
        self.nodes[entry.v].out.retain(|&x| x != e);
        self.nodes[entry.w].in_.retain(|&x| x != e);
        self.live_edges -= 1;
        Some(entry.label)
    }

    /// Flips the direction of edge `e` in place, keeping its index and label.
    pub fn reverse_edge(&mut self, e: EdgeIx) -> bool {
        let Some(entry) = self.edges.get_mut(e).and_then(|x| x.as_mut()) else {
            return false;
        };
        let (v, w) = (entry.v, entry.w);
        (entry.v, entry.w) = (w, v);

        self.nodes[v].out.retain(|&x| x != e);
        self.nodes[w].in_.retain(|&x| x != e);
        self.nodes[w].out.push(e);
        self.nodes[v].in_.push(e);
        true
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn has_node(&self, v: NodeIx) -> bool {
        v < self.nodes.len()
    }

    pub fn node(&self, v: NodeIx) -> Option<&N> {
        self.nodes.get(v).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, v: NodeIx) -> Option<&mut N> {
        self.nodes.get_mut(v).map(|n| &mut n.label)
    }

    pub fn node_ixs(&self) -> std::ops::Range<NodeIx> {
        0..self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &N)> {
        self.nodes.iter().enumerate().map(|(ix, n)| (ix, &n.label))
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(NodeIx, &mut N),
    {
        for (ix, n) in self.nodes.iter_mut().enumerate() {
            f(ix, &mut n.label);
        }
    }

    pub fn edge(&self, e: EdgeIx) -> Option<&E> {
        self.edges.get(e)?.as_ref().map(|x| &x.label)
    }

    pub fn edge_mut(&mut self, e: EdgeIx) -> Option<&mut E> {
        self.edges.get_mut(e)?.as_mut().map(|x| &mut x.label)
    }

    /// `(tail, head)` of a live edge.
    pub fn endpoints(&self, e: EdgeIx) -> Option<(NodeIx, NodeIx)> {
        self.edges.get(e)?.as_ref().map(|x| (x.v, x.w))
    }

    /// Live edges as `(index, tail, head, label)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, NodeIx, NodeIx, &E)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(ix, e)| e.as_ref().map(|e| (ix, e.v, e.w, &e.label)))
    }

    pub fn out_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.nodes.get(v).map(|n| n.out.as_slice()).unwrap_or(&[])
    }

    pub fn in_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.nodes.get(v).map(|n| n.in_.as_slice()).unwrap_or(&[])
    }

    /// Heads of out-edges, one entry per edge (parallel edges repeat).
    pub fn successors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.out_edges(v)
            .iter()
            .filter_map(|&e| self.endpoints(e).map(|(_, w)| w))
    }

    /// Tails of in-edges, one entry per edge (parallel edges repeat).
    pub fn predecessors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.in_edges(v)
            .iter()
            .filter_map(|&e| self.endpoints(e).map(|(u, _)| u))
    }
}
