use stratum::model::{LayoutGraph, NodeLabel, Rect};
use stratum::routing::{route, self_loop};
use stratum::util::{build_layer_matrix, intersect_rect, max_rank, normalize_ranks};
use stratum::{LayoutDirection, Point};

const RECT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 20.0,
    height: 10.0,
};

#[test]
fn intersect_rect_clips_at_the_side_facing_the_point() {
    assert_eq!(intersect_rect(RECT, Point::new(100.0, 0.0)), Point::new(10.0, 0.0));
    assert_eq!(intersect_rect(RECT, Point::new(-100.0, 0.0)), Point::new(-10.0, 0.0));
    assert_eq!(intersect_rect(RECT, Point::new(0.0, -50.0)), Point::new(0.0, -5.0));
    assert_eq!(intersect_rect(RECT, Point::new(20.0, 20.0)), Point::new(5.0, 5.0));
}

#[test]
fn intersect_rect_stays_finite_for_the_center() {
    let p = intersect_rect(RECT, Point::new(0.0, 0.0));
    assert_eq!(p, Point::new(10.0, 0.0));
}

#[test]
fn build_layer_matrix_groups_by_rank_and_sorts_by_order() {
    let mut g = LayoutGraph::new();
    let labels = [
        (Some(1), Some(1)),
        (Some(0), Some(0)),
        (Some(1), Some(0)),
        (None, None),
    ];
    for (rank, order) in labels {
        g.add_node(NodeLabel {
            rank,
            order,
            ..NodeLabel::default()
        });
    }
    assert_eq!(build_layer_matrix(&g), vec![vec![1], vec![2, 0]]);
    assert_eq!(max_rank(&g), Some(1));
}

#[test]
fn normalize_ranks_shifts_the_minimum_to_zero() {
    let mut g = LayoutGraph::new();
    for rank in [3, -1] {
        g.add_node(NodeLabel {
            rank: Some(rank),
            ..NodeLabel::default()
        });
    }
    normalize_ranks(&mut g);
    let ranks: Vec<_> = g.nodes().map(|(_, n)| n.rank).collect();
    assert_eq!(ranks, vec![Some(4), Some(0)]);

    let mut empty = LayoutGraph::new();
    normalize_ranks(&mut empty);
    assert_eq!(max_rank(&empty), None);
}

#[test]
fn route_clips_both_ends_against_their_nodes() {
    let target = Rect { y: 100.0, ..RECT };
    assert_eq!(
        route(RECT, target, &[]),
        vec![Point::new(0.0, 5.0), Point::new(0.0, 95.0)]
    );

    let points = route(RECT, target, &[Point::new(50.0, 50.0)]);
    assert_eq!(
        points,
        vec![Point::new(5.0, 5.0), Point::new(50.0, 50.0), Point::new(5.0, 95.0)]
    );
}

#[test]
fn self_loop_sits_beside_vertical_layouts_and_below_horizontal_ones() {
    let node = Rect {
        x: 0.0,
        y: 0.0,
        width: 40.0,
        height: 20.0,
    };

    let tb = self_loop(node, LayoutDirection::TB, 12.0);
    assert_eq!(tb.len(), 5);
    assert_eq!(tb[0], Point::new(20.0, -5.0));
    assert_eq!(tb[2], Point::new(32.0, 0.0));
    assert_eq!(tb[4], Point::new(20.0, 5.0));

    let lr = self_loop(node, LayoutDirection::LR, 12.0);
    assert_eq!(lr.len(), 5);
    assert_eq!(lr[0], Point::new(-10.0, 10.0));
    assert_eq!(lr[2], Point::new(0.0, 22.0));
    assert_eq!(lr[4], Point::new(10.0, 10.0));
}
