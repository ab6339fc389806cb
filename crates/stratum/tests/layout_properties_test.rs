//! Property tests for the public layout entry point.
//!
//! For arbitrary small graphs (cycles, self-loops, parallel and dangling edges included):
//!
//! 1. Every input node comes back, in input order, with a finite position.
//! 2. Edges are returned untouched.
//! 3. No two node rectangles overlap.
//! 4. Nodes sharing a row are at least `node_sep` apart across it.
//! 5. The same input always produces the same output.

use proptest::prelude::*;
use stratum::{
    Edge, Footprint, LayoutDirection, LayoutOptions, LayoutResult, Node, try_layout,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn direction_strategy() -> impl Strategy<Value = LayoutDirection> {
    prop_oneof![
        Just(LayoutDirection::TB),
        Just(LayoutDirection::BT),
        Just(LayoutDirection::LR),
        Just(LayoutDirection::RL),
    ]
}

fn node_strategy() -> impl Strategy<Value = Option<(f64, f64)>> {
    prop::option::of((10.0f64..300.0, 10.0f64..120.0))
}

/// Nodes plus edges whose endpoints may point past the node list (dangling).
fn graph_strategy() -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
    (1usize..25)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(node_strategy(), n),
                prop::collection::vec((0..n + 3, 0..n + 3), 0..(2 * n + 4)),
            )
        })
        .prop_map(|(sizes, pairs)| {
            let nodes = sizes
                .into_iter()
                .enumerate()
                .map(|(i, size)| match size {
                    Some((w, h)) => Node::new(format!("n{i}")).with_size(w, h),
                    None => Node::new(format!("n{i}")),
                })
                .collect();
            let edges = pairs
                .into_iter()
                .map(|(s, t)| Edge::new(format!("n{s}"), format!("n{t}")))
                .collect();
            (nodes, edges)
        })
}

fn overlapping_pair(result: &LayoutResult) -> Option<(String, String)> {
    let rects: Vec<(f64, f64, f64, f64)> = result
        .nodes
        .iter()
        .map(|n| {
            let p = n.position.unwrap_or_default();
            let fp = n.footprint(Footprint::default());
            (p.x, p.y, p.x + fp.width, p.y + fp.height)
        })
        .collect();
    for i in 0..rects.len() {
        for j in i + 1..rects.len() {
            let (a, b) = (rects[i], rects[j]);
            let overlap_x = a.0 < b.2 - 1e-6 && b.0 < a.2 - 1e-6;
            let overlap_y = a.1 < b.3 - 1e-6 && b.1 < a.3 - 1e-6;
            if overlap_x && overlap_y {
                return Some((result.nodes[i].id.clone(), result.nodes[j].id.clone()));
            }
        }
    }
    None
}

/// Smallest cross-axis gap between nodes whose rank-axis extents overlap.
fn tightest_row_gap(result: &LayoutResult, direction: LayoutDirection) -> Option<f64> {
    // (rank-axis start, rank-axis end, cross-axis start, cross-axis end)
    let spans: Vec<(f64, f64, f64, f64)> = result
        .nodes
        .iter()
        .map(|n| {
            let p = n.position.unwrap_or_default();
            let fp = n.footprint(Footprint::default());
            if direction.is_horizontal() {
                (p.x, p.x + fp.width, p.y, p.y + fp.height)
            } else {
                (p.y, p.y + fp.height, p.x, p.x + fp.width)
            }
        })
        .collect();
    let mut tightest: Option<f64> = None;
    for i in 0..spans.len() {
        for j in i + 1..spans.len() {
            let (a, b) = (spans[i], spans[j]);
            if a.0 >= b.1 - 1e-6 || b.0 >= a.1 - 1e-6 {
                continue;
            }
            let gap = (b.2 - a.3).max(a.2 - b.3);
            tightest = Some(tightest.map_or(gap, |t| t.min(gap)));
        }
    }
    tightest
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn layout_places_every_node_without_overlap(
        graph in graph_strategy(),
        direction in direction_strategy(),
    ) {
        let (nodes, edges) = graph;
        let options = LayoutOptions::with_direction(direction);
        let result = try_layout(&nodes, &edges, &options).unwrap();

        prop_assert_eq!(result.nodes.len(), nodes.len());
        for (out, input) in result.nodes.iter().zip(&nodes) {
            prop_assert_eq!(&out.id, &input.id);
            prop_assert!(out.position.is_some_and(|p| p.is_finite()), "{:?}", out);
        }
        prop_assert_eq!(&result.edges, &edges);

        let overlap = overlapping_pair(&result);
        prop_assert!(overlap.is_none(), "overlapping nodes: {:?}", overlap);
    }

    #[test]
    fn nodes_in_one_row_keep_node_sep(
        graph in graph_strategy(),
        direction in direction_strategy(),
        component_sep in 0.0f64..120.0,
    ) {
        let (nodes, edges) = graph;
        let options = LayoutOptions {
            direction,
            component_sep,
            ..Default::default()
        };
        let result = try_layout(&nodes, &edges, &options).unwrap();

        if let Some(gap) = tightest_row_gap(&result, direction) {
            prop_assert!(gap >= options.node_sep - 1e-6, "row gap {} < {}", gap, options.node_sep);
        }
    }

    #[test]
    fn layout_is_deterministic(
        graph in graph_strategy(),
        direction in direction_strategy(),
    ) {
        let (nodes, edges) = graph;
        let options = LayoutOptions::with_direction(direction);
        let first = try_layout(&nodes, &edges, &options).unwrap();
        let second = try_layout(&nodes, &edges, &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn routes_start_and_end_on_their_nodes(
        graph in graph_strategy(),
    ) {
        let (nodes, edges) = graph;
        let result = try_layout(&nodes, &edges, &LayoutOptions::default()).unwrap();
        for route in &result.routes {
            let edge = &edges[route.edge];
            prop_assert_eq!(&route.id, &edge.id);
            prop_assert!(route.points.len() >= 2);
            prop_assert!(route.points.iter().all(|p| p.is_finite()));

            // Endpoints resolve to the first node with the id.
            let source = result.node(&edge.source).unwrap();
            let p = route.points[0];
            let tl = source.position.unwrap();
            let fp = source.footprint(Footprint::default());
            prop_assert!(
                p.x >= tl.x - 1e-6
                    && p.x <= tl.x + fp.width + 1e-6
                    && p.y >= tl.y - 1e-6
                    && p.y <= tl.y + fp.height + 1e-6,
                "route {} starts at {:?} outside {:?}",
                route.id,
                p,
                tl
            );
        }
    }
}
