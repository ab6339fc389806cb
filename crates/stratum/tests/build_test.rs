use stratum::build::prepare;
use stratum::{Edge, Footprint, Node};

fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter().map(|&id| Node::new(id)).collect()
}

#[test]
fn prepare_splits_components_in_first_seen_order() {
    let ns = nodes(&["x", "c", "a", "d", "b"]);
    let es = vec![Edge::new("d", "c"), Edge::new("a", "b")];
    let prepared = prepare(&ns, &es, Footprint::default());

    assert_eq!(prepared.components.len(), 2);
    assert_eq!(prepared.components[0].nodes, vec![1, 3]);
    assert_eq!(prepared.components[0].edges, vec![0]);
    assert_eq!(prepared.components[1].nodes, vec![2, 4]);
    assert_eq!(prepared.components[1].edges, vec![1]);
    assert_eq!(prepared.isolated.nodes, vec![0]);
    assert_eq!(prepared.endpoints, vec![Some((3, 1)), Some((2, 4))]);
}

#[test]
fn prepare_counts_dangling_edges_and_duplicate_ids() {
    let ns = nodes(&["a", "b", "a"]);
    let es = vec![
        Edge::new("a", "b"),
        Edge::new("a", "missing"),
        Edge::new("nowhere", "b"),
    ];
    let prepared = prepare(&ns, &es, Footprint::default());

    assert_eq!(prepared.dangling, 2);
    assert_eq!(prepared.duplicate_ids, 1);
    assert_eq!(prepared.endpoints, vec![Some((0, 1)), None, None]);
    assert_eq!(prepared.components[0].nodes, vec![0, 1]);
    assert_eq!(prepared.isolated.nodes, vec![2]);
}

#[test]
fn prepare_keeps_self_loops_with_their_node() {
    let ns = nodes(&["a", "b", "c"]);
    let es = vec![Edge::new("a", "a"), Edge::new("b", "c"), Edge::new("c", "c")];
    let prepared = prepare(&ns, &es, Footprint::default());

    assert_eq!(prepared.isolated.nodes, vec![0]);
    assert_eq!(prepared.isolated.self_loops, vec![0]);
    assert!(prepared.isolated.edges.is_empty());
    assert_eq!(prepared.components[0].edges, vec![1]);
    assert_eq!(prepared.components[0].self_loops, vec![2]);
}

#[test]
fn prepare_resolves_footprints() {
    let ns = vec![
        Node::new("a"),
        Node::new("b").with_size(40.0, 20.0),
        Node::new("c").with_size(-1.0, f64::NAN),
    ];
    let prepared = prepare(&ns, &[], Footprint::new(100.0, 30.0));

    assert_eq!(
        prepared.footprints,
        vec![
            Footprint::new(100.0, 30.0),
            Footprint::new(40.0, 20.0),
            Footprint::new(1.0, 1.0),
        ]
    );
    assert_eq!(prepared.isolated.nodes, vec![0, 1, 2]);
}
