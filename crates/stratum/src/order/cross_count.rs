use crate::model::LayoutGraph;
use stratum_graph::NodeIx;

/// Weighted number of edge crossings between consecutive layers.
///
/// Uses the accumulator tree from Barth, Jünger and Mutzel, "Simple and Efficient Bilayer Cross
/// Counting", so each layer pair costs `O(e log n)`.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<NodeIx>]) -> f64 {
    let mut pos: Vec<Option<usize>> = vec![None; g.node_count()];
    let mut cc = 0.0;
    for i in 1..layering.len() {
        cc += two_layer_cross_count(g, &layering[i - 1], &layering[i], &mut pos);
    }
    cc
}

fn two_layer_cross_count(
    g: &LayoutGraph,
    north: &[NodeIx],
    south: &[NodeIx],
    south_pos: &mut [Option<usize>],
) -> f64 {
    if south.is_empty() {
        return 0.0;
    }
    for (i, &v) in south.iter().enumerate() {
        south_pos[v] = Some(i);
    }

    let mut south_entries: Vec<(usize, f64)> = Vec::new();
    for &v in north {
        let start = south_entries.len();
        for &e in g.out_edges(v) {
            let (Some((_, w)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
                continue;
            };
            if let Some(pos) = south_pos[w] {
                south_entries.push((pos, label.weight));
            }
        }
        south_entries[start..].sort_by_key(|&(pos, _)| pos);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree = vec![0.0; tree_size];

    let mut cc = 0.0;
    for (pos, weight) in south_entries {
        let mut index = pos + first_index;
        tree[index] += weight;
        let mut weight_sum = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += weight;
        }
        cc += weight * weight_sum;
    }

    for &v in south {
        south_pos[v] = None;
    }
    cc
}
