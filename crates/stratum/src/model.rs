//! Labels of the internal layered graph.
//!
//! The layered graph only lives for one layout call. Real nodes point back at the caller's node
//! list through `origin`; dummy nodes (waypoints of long edges) have no origin.

use crate::diagram::Point;
use stratum_graph::Graph;

pub type LayoutGraph = Graph<NodeLabel, EdgeLabel>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    /// Index into the caller's node list; `None` for dummy nodes.
    pub origin: Option<usize>,
    /// Set on dummy nodes: index into the caller's edge list of the edge they belong to.
    pub dummy_for: Option<usize>,
}

impl NodeLabel {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy_for.is_some()
    }

    pub fn center(&self) -> Option<Point> {
        Some(Point {
            x: self.x?,
            y: self.y?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub weight: f64,
    pub minlen: usize,
    /// Temporarily reversed to break a cycle.
    pub reversed: bool,
    /// Index into the caller's edge list.
    pub origin: usize,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            weight: 1.0,
            minlen: 1,
            reversed: false,
            origin: 0,
        }
    }
}

impl EdgeLabel {
    pub fn for_edge(origin: usize) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }
}

/// Axis-aligned rectangle given by its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}
