//! Layout configuration.
//!
//! Every field has a default, so callers (and JSON configs coming from the diagram store) only
//! spell out what they want to change.

use crate::diagram::{Footprint, LayoutDirection};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Rank assignment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
}

/// Feedback edge selection used to make the graph acyclic before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Acyclicer {
    #[default]
    Dfs,
    Greedy,
}

/// What happens to connection sides a caller already set on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlePolicy {
    /// Overwrite both sides from the layout direction.
    #[default]
    Reset,
    /// Keep sides the caller already set; only fill the missing ones.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub direction: LayoutDirection,
    /// Minimum gap between neighbouring nodes of the same rank.
    pub node_sep: f64,
    /// Minimum gap between consecutive ranks.
    pub rank_sep: f64,
    /// Gap reserved next to edge waypoints inside a rank.
    pub edge_sep: f64,
    /// Gap between disconnected components; `node_sep` when smaller, since rank 0 rows line up.
    pub component_sep: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Footprint for nodes that do not carry their own width/height.
    pub default_footprint: Footprint,
    pub ranker: Ranker,
    pub acyclicer: Acyclicer,
    /// Upper bound on crossing-reduction sweeps per component.
    pub max_order_sweeps: usize,
    pub handle_policy: HandlePolicy,
    /// `compute_async` moves graphs with at least this many nodes to a worker thread.
    pub offload_min_nodes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::TB,
            node_sep: 50.0,
            rank_sep: 80.0,
            edge_sep: 20.0,
            component_sep: 80.0,
            margin_x: 20.0,
            margin_y: 20.0,
            default_footprint: Footprint::default(),
            ranker: Ranker::NetworkSimplex,
            acyclicer: Acyclicer::Dfs,
            max_order_sweeps: 8,
            handle_policy: HandlePolicy::Reset,
            offload_min_nodes: 200,
        }
    }
}

impl LayoutOptions {
    pub fn with_direction(direction: LayoutDirection) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("nodeSep", self.node_sep),
            ("rankSep", self.rank_sep),
            ("edgeSep", self.edge_sep),
            ("componentSep", self.component_sep),
            ("marginX", self.margin_x),
            ("marginY", self.margin_y),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOption {
                    name,
                    value: value.to_string(),
                });
            }
        }
        if self.max_order_sweeps == 0 {
            return Err(Error::InvalidOption {
                name: "maxOrderSweeps",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}
