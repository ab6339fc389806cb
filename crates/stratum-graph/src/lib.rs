#![forbid(unsafe_code)]

//! Graph container used by `stratum`.
//!
//! Nodes and edges live in flat arenas and are addressed by plain `usize` indices. Adjacency is
//! kept per node so layout passes can walk predecessors/successors without scanning every edge.
//! Edge removal leaves a tombstone, so edge indices stay stable for the lifetime of the graph.

pub mod graph;

pub use graph::{EdgeIx, Graph, NodeIx, alg};
