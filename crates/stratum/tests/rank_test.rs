use stratum::config::Ranker;
use stratum::model::{EdgeLabel, LayoutGraph, NodeLabel};
use stratum::rank;
use stratum::rank::feasible_tree::feasible_tree;
use stratum::rank::util::{longest_path, slack};
use stratum_graph::{Graph, alg};

const RANKERS: [Ranker; 3] = [Ranker::NetworkSimplex, Ranker::TightTree, Ranker::LongestPath];

fn graph(n: usize, edges: &[(usize, usize)]) -> LayoutGraph {
    let mut g = LayoutGraph::new();
    for _ in 0..n {
        g.add_node(NodeLabel::default());
    }
    for (i, &(v, w)) in edges.iter().enumerate() {
        g.add_edge(v, w, EdgeLabel::for_edge(i));
    }
    g
}

fn ranks(g: &LayoutGraph) -> Vec<i32> {
    g.nodes().map(|(_, n)| n.rank.unwrap()).collect()
}

#[test]
fn rank_assigns_zero_to_graphs_without_edges() {
    for ranker in RANKERS {
        let mut g = graph(3, &[]);
        rank::rank(&mut g, ranker);
        assert_eq!(ranks(&g), vec![0, 0, 0]);
    }
}

#[test]
fn rank_respects_minlen_and_normalizes() {
    for ranker in RANKERS {
        let mut g = graph(5, &[(0, 1), (1, 2), (0, 3), (3, 2), (2, 4), (0, 4)]);
        g.edge_mut(3).unwrap().minlen = 2;
        rank::rank(&mut g, ranker);

        assert_eq!(rank::violations(&g), 0, "{ranker:?}");
        assert_eq!(ranks(&g).into_iter().min(), Some(0));
        assert_eq!(g.node(0).unwrap().rank, Some(0));
        assert_eq!(g.node(2).unwrap().rank, Some(3));
    }
}

#[test]
fn rank_handles_disconnected_graphs() {
    for ranker in RANKERS {
        let mut g = graph(5, &[(0, 1), (2, 3), (3, 4)]);
        rank::rank(&mut g, ranker);
        assert_eq!(rank::violations(&g), 0, "{ranker:?}");
        assert!(ranks(&g).iter().all(|&r| r >= 0));
    }
}

#[test]
fn longest_path_pushes_sinks_to_the_bottom() {
    // a -> b -> c -> d, a -> x
    let mut g = graph(5, &[(0, 1), (1, 2), (2, 3), (0, 4)]);
    rank::rank(&mut g, Ranker::LongestPath);
    assert_eq!(ranks(&g), vec![0, 1, 2, 3, 3]);
}

#[test]
fn network_simplex_shortens_slack_edges() {
    let mut g = graph(5, &[(0, 1), (1, 2), (2, 3), (0, 4)]);
    rank::rank(&mut g, Ranker::NetworkSimplex);
    assert_eq!(ranks(&g), vec![0, 1, 2, 3, 1]);

    let mut g = graph(5, &[(0, 1), (1, 2), (2, 3), (0, 4)]);
    rank::rank(&mut g, Ranker::TightTree);
    assert_eq!(ranks(&g), vec![0, 1, 2, 3, 1]);
}

#[test]
fn network_simplex_ranks_the_gansner_graph() {
    // a b c d h e f g
    let (a, b, c, d, h, e, f, gg) = (0, 1, 2, 3, 4, 5, 6, 7);
    let mut g = graph(
        8,
        &[
            (a, b),
            (b, c),
            (c, d),
            (d, h),
            (a, e),
            (e, gg),
            (gg, h),
            (a, f),
            (f, gg),
        ],
    );
    rank::rank(&mut g, Ranker::NetworkSimplex);
    assert_eq!(ranks(&g), vec![0, 1, 2, 3, 4, 1, 1, 2]);
}

#[test]
fn network_simplex_keeps_minlen_on_weighted_edges() {
    // a -> b -> c and a -> c; minlen 2 on a -> b puts c at rank 3 whatever the weights.
    let mut g = graph(3, &[(0, 1), (1, 2), (0, 2)]);
    g.edge_mut(0).unwrap().minlen = 2;
    g.edge_mut(2).unwrap().weight = 10.0;
    rank::rank(&mut g, Ranker::NetworkSimplex);
    assert_eq!(ranks(&g), vec![0, 2, 3]);
}

#[test]
fn feasible_tree_makes_a_spanning_tree_of_tight_edges() {
    let mut g = graph(5, &[(0, 1), (1, 2), (2, 3), (0, 4)]);
    longest_path(&mut g);
    assert_eq!(slack(&g, 3), Some(2));

    feasible_tree(&mut g);
    let r = ranks(&g);

    let mut tight: Graph<(), ()> = Graph::new();
    for _ in 0..g.node_count() {
        tight.add_node(());
    }
    for (e, v, w, _) in g.edges() {
        let s = slack(&g, e).unwrap();
        assert!(s >= 0);
        if s == 0 {
            tight.add_edge(v, w, ());
        }
    }
    assert_eq!(alg::components(&tight).len(), 1);
    assert_eq!(r[4] - r[0], 1);
    assert_eq!(r[3] - r[0], 3);
}

#[test]
fn slack_measures_extra_rank_span() {
    let mut g = graph(2, &[(0, 1)]);
    g.node_mut(0).unwrap().rank = Some(0);
    g.node_mut(1).unwrap().rank = Some(3);
    assert_eq!(slack(&g, 0), Some(2));
    assert_eq!(slack(&g, 7), None);
}
