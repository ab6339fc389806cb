//! Layered layout of one connected component.

use crate::build::{Component, Prepared};
use crate::config::LayoutOptions;
use crate::diagram::{MIN_FOOTPRINT, Point};
use crate::error::{Error, Result};
use crate::model::{EdgeLabel, LayoutGraph, NodeLabel, Rect};
use crate::position::Spacing;
use crate::{acyclic, coordinate_system, normalize, order, position, rank, routing};
use rustc_hash::FxHashMap;
use stratum_graph::{NodeIx, alg};
use tracing::debug;

/// Centers and routes of one component in its own coordinate frame (not yet packed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentLayout {
    /// `(caller node index, node rectangle)` in component input order.
    pub nodes: Vec<(usize, Rect)>,
    /// `(caller edge index, polyline)`.
    pub routes: Vec<(usize, Vec<Point>)>,
}

pub fn layout_component(
    component: &Component,
    prepared: &Prepared,
    options: &LayoutOptions,
) -> Result<ComponentLayout> {
    let direction = options.direction;
    let mut g = LayoutGraph::with_capacity(component.nodes.len(), component.edges.len());

    let mut local: FxHashMap<usize, NodeIx> = FxHashMap::default();
    for &n in &component.nodes {
        let fp = prepared.footprints[n];
        let v = g.add_node(NodeLabel {
            origin: Some(n),
            ..NodeLabel::sized(fp.width, fp.height)
        });
        local.insert(n, v);
    }
    for &e in &component.edges {
        let Some((source, target)) = prepared.endpoints[e] else {
            continue;
        };
        let (Some(&v), Some(&w)) = (local.get(&source), local.get(&target)) else {
            continue;
        };
        g.add_edge(v, w, EdgeLabel::for_edge(e));
    }

    coordinate_system::adjust(&mut g, direction);

    let reversed = acyclic::run(&mut g, options.acyclicer);
    if reversed > 0 {
        debug!(reversed, "reversed feedback edges");
    }
    if !alg::is_acyclic(&g) {
        return Err(Error::Internal {
            message: "graph still has a cycle after reversing feedback edges".to_string(),
        });
    }

    rank::rank(&mut g, options.ranker);
    let violations = rank::violations(&g);
    if violations > 0 {
        return Err(Error::Internal {
            message: format!("{violations} edges violate their rank constraint"),
        });
    }

    let chains = normalize::run(&mut g);
    order::order(&mut g, options.max_order_sweeps);
    position::position(
        &mut g,
        Spacing {
            node_sep: options.node_sep,
            edge_sep: options.edge_sep,
        },
        options.rank_sep,
    );
    coordinate_system::undo(&mut g, direction);

    let waypoints: FxHashMap<usize, Vec<Point>> =
        normalize::undo(&g, &chains).into_iter().collect();
    acyclic::undo(&mut g);

    let mut rects: FxHashMap<usize, Rect> = FxHashMap::default();
    let mut nodes = Vec::with_capacity(component.nodes.len());
    for (_, label) in g.nodes() {
        let Some(origin) = label.origin else {
            continue;
        };
        let Some(center) = label.center() else {
            return Err(Error::Internal {
                message: format!("node #{origin} was not positioned"),
            });
        };
        let rect = Rect {
            x: center.x,
            y: center.y,
            width: label.width,
            height: label.height,
        };
        rects.insert(origin, rect);
        nodes.push((origin, rect));
    }

    let mut routes = Vec::with_capacity(component.edges.len() + component.self_loops.len());
    for &e in &component.edges {
        let Some((source, target)) = prepared.endpoints[e] else {
            continue;
        };
        let (Some(&s), Some(&t)) = (rects.get(&source), rects.get(&target)) else {
            continue;
        };
        let points = waypoints.get(&e).map(Vec::as_slice).unwrap_or(&[]);
        routes.push((e, routing::route(s, t, points)));
    }

    let loop_extent = (options.node_sep / 2.0).max(MIN_FOOTPRINT);
    for &e in &component.self_loops {
        let Some((v, _)) = prepared.endpoints[e] else {
            continue;
        };
        if let Some(&rect) = rects.get(&v) {
            routes.push((e, routing::self_loop(rect, direction, loop_extent)));
        }
    }
    routes.sort_by_key(|(e, _)| *e);

    Ok(ComponentLayout { nodes, routes })
}
