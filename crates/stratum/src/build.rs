//! Input sanitation: resolve ids, drop dangling edges, split into components.

use crate::diagram::{Edge, Footprint, Node};
use rustc_hash::FxHashMap;
use stratum_graph::{Graph, alg};

/// Caller nodes and edges, addressed by their index in the caller's lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    pub nodes: Vec<usize>,
    /// Edges between two distinct nodes of this component.
    pub edges: Vec<usize>,
    /// Self-loops on nodes of this component.
    pub self_loops: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prepared {
    /// Effective footprint of every caller node.
    pub footprints: Vec<Footprint>,
    /// `(source, target)` node indices of every resolvable edge.
    pub endpoints: Vec<Option<(usize, usize)>>,
    /// Connected components with at least one edge, ordered by their first node.
    pub components: Vec<Component>,
    /// Nodes without any edge to another node, in input order.
    pub isolated: Component,
    pub dangling: usize,
    pub duplicate_ids: usize,
}

pub fn prepare(nodes: &[Node], edges: &[Edge], default_footprint: Footprint) -> Prepared {
    let footprints: Vec<Footprint> = nodes
        .iter()
        .map(|n| n.footprint(default_footprint))
        .collect();

    // First occurrence wins; later duplicates never receive edges and end up isolated.
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut duplicate_ids = 0;
    for (i, n) in nodes.iter().enumerate() {
        if index.contains_key(n.id.as_str()) {
            duplicate_ids += 1;
        } else {
            index.insert(n.id.as_str(), i);
        }
    }

    let mut dangling = 0;
    let endpoints: Vec<Option<(usize, usize)>> = edges
        .iter()
        .map(|e| {
            let resolved = index
                .get(e.source.as_str())
                .zip(index.get(e.target.as_str()))
                .map(|(&v, &w)| (v, w));
            if resolved.is_none() {
                dangling += 1;
            }
            resolved
        })
        .collect();

    let mut connectivity: Graph<(), ()> = Graph::with_capacity(nodes.len(), edges.len());
    for _ in nodes {
        connectivity.add_node(());
    }
    for &(v, w) in endpoints.iter().flatten() {
        if v != w {
            connectivity.add_edge(v, w, ());
        }
    }

    let mut component_of: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut components: Vec<Component> = Vec::new();
    let mut isolated = Component::default();
    let mut isolated_slot: Vec<bool> = vec![false; nodes.len()];

    // Members come back sorted and components ordered by smallest member, i.e. first-seen order.
    for members in alg::components(&connectivity) {
        if members.len() == 1 {
            isolated_slot[members[0]] = true;
            isolated.nodes.push(members[0]);
            continue;
        }
        for &v in &members {
            component_of[v] = Some(components.len());
        }
        components.push(Component {
            nodes: members,
            ..Default::default()
        });
    }
    isolated.nodes.sort_unstable();

    for (e, ends) in endpoints.iter().enumerate() {
        let Some((v, w)) = *ends else {
            continue;
        };
        let target = match component_of[v] {
            Some(c) => &mut components[c],
            None if isolated_slot[v] => &mut isolated,
            None => continue,
        };
        if v == w {
            target.self_loops.push(e);
        } else {
            target.edges.push(e);
        }
    }

    Prepared {
        footprints,
        endpoints,
        components,
        isolated,
        dangling,
        duplicate_ids,
    }
}
