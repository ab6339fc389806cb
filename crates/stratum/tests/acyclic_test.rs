use stratum::acyclic;
use stratum::config::Acyclicer;
use stratum::greedy_fas;
use stratum::model::{EdgeLabel, LayoutGraph, NodeLabel};
use stratum_graph::alg;

fn graph(n: usize, edges: &[(usize, usize)]) -> LayoutGraph {
    let mut g = LayoutGraph::new();
    for _ in 0..n {
        g.add_node(NodeLabel::sized(10.0, 10.0));
    }
    for (i, &(v, w)) in edges.iter().enumerate() {
        g.add_edge(v, w, EdgeLabel::for_edge(i));
    }
    g
}

fn endpoints(g: &LayoutGraph) -> Vec<(usize, usize)> {
    g.edges().map(|(_, v, w, _)| (v, w)).collect()
}

const ACYCLICERS: [Acyclicer; 2] = [Acyclicer::Dfs, Acyclicer::Greedy];

#[test]
fn acyclic_run_does_not_change_an_already_acyclic_graph() {
    for acyclicer in ACYCLICERS {
        let mut g = graph(4, &[(0, 1), (1, 3), (0, 2), (2, 3)]);
        let before = endpoints(&g);

        assert_eq!(acyclic::run(&mut g, acyclicer), 0);
        assert_eq!(endpoints(&g), before);
    }
}

#[test]
fn acyclic_run_breaks_a_two_node_cycle() {
    for acyclicer in ACYCLICERS {
        let mut g = graph(2, &[(0, 1), (1, 0)]);
        assert_eq!(acyclic::run(&mut g, acyclicer), 1);
        assert!(alg::is_acyclic(&g));
    }
}

#[test]
fn acyclic_run_breaks_overlapping_cycles() {
    for acyclicer in ACYCLICERS {
        let mut g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 0), (2, 0), (3, 4), (4, 1)]);
        acyclic::run(&mut g, acyclicer);
        assert!(alg::is_acyclic(&g), "{acyclicer:?} left a cycle");
        assert_eq!(g.edge_count(), 7);
    }
}

#[test]
fn acyclic_run_leaves_self_loops_alone() {
    for acyclicer in ACYCLICERS {
        let mut g = graph(2, &[(0, 0), (0, 1)]);
        assert_eq!(acyclic::run(&mut g, acyclicer), 0);
        assert_eq!(g.endpoints(0), Some((0, 0)));
        assert!(!g.edge(0).unwrap().reversed);
    }
}

#[test]
fn acyclic_undo_restores_original_directions() {
    for acyclicer in ACYCLICERS {
        let mut g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let before = endpoints(&g);

        acyclic::run(&mut g, acyclicer);
        assert!(g.edges().any(|(_, _, _, lbl)| lbl.reversed));
        acyclic::undo(&mut g);

        assert_eq!(endpoints(&g), before);
        assert!(g.edges().all(|(_, _, _, lbl)| !lbl.reversed));
    }
}

#[test]
fn dfs_fas_returns_the_back_edge() {
    let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
    assert_eq!(acyclic::dfs_fas(&g), vec![2]);
}

#[test]
fn greedy_fas_drops_the_lighter_edge_of_a_two_cycle() {
    let mut g = graph(2, &[(0, 1), (1, 0)]);
    g.edge_mut(0).unwrap().weight = 2.0;

    let fas = greedy_fas::greedy_fas_with_weight(&g, |lbl| lbl.weight.round() as i64);
    assert_eq!(fas, vec![1]);
}

#[test]
fn greedy_fas_weighs_edges_by_rounded_weight() {
    let mut g = graph(2, &[(0, 1), (1, 0)]);
    g.edge_mut(1).unwrap().weight = 3.4;
    assert_eq!(greedy_fas::greedy_fas(&g), vec![0]);

    let mut g = graph(2, &[(0, 1), (1, 0)]);
    g.edge_mut(0).unwrap().weight = 3.4;
    assert_eq!(greedy_fas::greedy_fas(&g), vec![1]);
}

#[test]
fn greedy_fas_returns_nothing_for_a_dag() {
    let g = graph(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
    assert!(greedy_fas::greedy_fas(&g).is_empty());
}
