use stratum::Point;
use stratum::model::{EdgeLabel, LayoutGraph, NodeLabel};
use stratum::normalize;

fn ranked(ranks: &[i32]) -> LayoutGraph {
    let mut g = LayoutGraph::new();
    for &rank in ranks {
        g.add_node(NodeLabel {
            rank: Some(rank),
            ..NodeLabel::sized(10.0, 10.0)
        });
    }
    g
}

#[test]
fn run_splits_long_edges_into_unit_segments() {
    let mut g = ranked(&[0, 3, 1]);
    g.add_edge(0, 1, EdgeLabel {
        weight: 2.0,
        minlen: 3,
        ..EdgeLabel::for_edge(7)
    });
    g.add_edge(0, 2, EdgeLabel::for_edge(8));

    let chains = normalize::run(&mut g);

    assert_eq!(chains.len(), 1);
    let chain = &chains[0];
    assert_eq!(chain.edge, 7);
    assert!(!chain.reversed);
    assert_eq!(chain.dummies.len(), 2);
    for (i, &d) in chain.dummies.iter().enumerate() {
        let label = g.node(d).unwrap();
        assert_eq!(label.rank, Some(i as i32 + 1));
        assert_eq!(label.dummy_for, Some(7));
        assert_eq!((label.width, label.height), (0.0, 0.0));
    }

    let pairs: Vec<(usize, usize)> = g.edges().map(|(_, v, w, _)| (v, w)).collect();
    assert!(!pairs.contains(&(0, 1)));
    assert!(pairs.contains(&(0, 2)));
    assert_eq!(g.edge_count(), 4);
    for (_, v, w, label) in g.edges() {
        let span = g.node(w).unwrap().rank.unwrap() - g.node(v).unwrap().rank.unwrap();
        assert_eq!(span, 1);
        assert_eq!(label.minlen, 1);
        if label.origin == 7 {
            assert_eq!(label.weight, 2.0);
        }
    }
}

#[test]
fn undo_returns_dummy_centers_in_edge_direction() {
    for reversed in [false, true] {
        let mut g = ranked(&[0, 3]);
        g.add_edge(0, 1, EdgeLabel {
            reversed,
            ..EdgeLabel::for_edge(0)
        });

        let chains = normalize::run(&mut g);
        assert_eq!(chains[0].reversed, reversed);
        for (i, &d) in chains[0].dummies.iter().enumerate() {
            let n = g.node_mut(d).unwrap();
            n.x = Some(5.0);
            n.y = Some(10.0 * (i + 1) as f64);
        }

        let waypoints = normalize::undo(&g, &chains);
        let mut expected = vec![Point::new(5.0, 10.0), Point::new(5.0, 20.0)];
        if reversed {
            expected.reverse();
        }
        assert_eq!(waypoints, vec![(0, expected)]);
    }
}
