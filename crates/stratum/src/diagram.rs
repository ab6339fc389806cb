//! Caller-facing diagram types.
//!
//! These mirror the JSON shape the diagram store keeps for nodes and edges (camelCase fields).
//! Anything the layout engine does not understand is carried in `extras` and passed through
//! untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Smallest width/height used for a node whose footprint is zero, negative, or not finite.
pub const MIN_FOOTPRINT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl LayoutDirection {
    pub const ALL: [LayoutDirection; 4] = [Self::TB, Self::BT, Self::LR, Self::RL];

    /// Ranks progress along the X axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LR | Self::RL)
    }

    /// Ranks progress towards smaller coordinates.
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BT | Self::RL)
    }

    /// Side that outgoing edges leave from.
    pub fn source_side(self) -> HandleSide {
        match self {
            Self::TB => HandleSide::Bottom,
            Self::BT => HandleSide::Top,
            Self::LR => HandleSide::Right,
            Self::RL => HandleSide::Left,
        }
    }

    /// Side that incoming edges arrive at.
    pub fn target_side(self) -> HandleSide {
        self.source_side().opposite()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TB => "TB",
            Self::BT => "BT",
            Self::LR => "LR",
            Self::RL => "RL",
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout direction: {input:?}")]
pub struct ParseDirectionError {
    pub input: String,
}

impl FromStr for LayoutDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tb" | "td" | "top-to-bottom" => Ok(Self::TB),
            "bt" | "bottom-to-top" => Ok(Self::BT),
            "lr" | "left-to-right" => Ok(Self::LR),
            "rl" | "right-to-left" => Ok(Self::RL),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

/// Side of a node's bounding box an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 172.0,
            height: 36.0,
        }
    }
}

impl Footprint {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replaces degenerate sides with [`MIN_FOOTPRINT`].
    pub fn sanitized(self) -> Self {
        fn side(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                MIN_FOOTPRINT
            }
        }
        Self {
            width: side(self.width),
            height: side(self.height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Top-left corner. `None` until the node has been laid out or placed by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_position: Option<HandleSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<HandleSide>,
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: None,
            height: None,
            position: None,
            source_position: None,
            target_position: None,
            extras: BTreeMap::new(),
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point { x, y });
        self
    }

    /// Effective footprint: the node's own size where given, `default` otherwise, sanitized.
    pub fn footprint(&self, default: Footprint) -> Footprint {
        Footprint {
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
        }
        .sanitized()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Edge {
    /// Edge with a derived `source->target` id.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}->{target}"),
            source,
            target,
            extras: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Polyline for one input edge, from the source node boundary to the target node boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRoute {
    /// Index into the caller's edge list.
    pub edge: usize,
    pub id: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub routes: Vec<EdgeRoute>,
}

impl LayoutResult {
    /// The input handed back as-is; used for the empty fast path and for failure fallback.
    pub fn unchanged(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            routes: Vec::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.node(id).and_then(|n| n.position)
    }
}
