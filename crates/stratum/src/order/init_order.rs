use crate::model::LayoutGraph;
use stratum_graph::{NodeIx, alg};

/// Initial order: a depth-first walk started from nodes sorted by rank (then index), appending
/// each node to its rank's layer when first visited. Keeps connected chains next to each other.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<NodeIx>> {
    let Some(max_rank) = crate::util::max_rank(g) else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<NodeIx>> = vec![Vec::new(); (max_rank + 1).max(0) as usize];

    let mut roots: Vec<NodeIx> = g
        .nodes()
        .filter(|(_, n)| n.rank.is_some())
        .map(|(v, _)| v)
        .collect();
    roots.sort_by_key(|&v| (g.node(v).and_then(|n| n.rank).unwrap_or(i32::MAX), v));

    for v in alg::preorder(g, &roots) {
        let Some(rank) = g.node(v).and_then(|n| n.rank) else {
            continue;
        };
        if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
            layer.push(v);
        }
    }
    layers
}
