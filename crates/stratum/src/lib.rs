#![forbid(unsafe_code)]

//! Deterministic layered auto-layout for diagram editors.
//!
//! Given the editor's nodes and directed edges, [`layout`] computes non-overlapping top-left
//! positions following a [`LayoutDirection`], keeping edge crossings low. Cyclic, disconnected
//! and dangling input is tolerated; the call never fails and hands the input back unchanged if
//! something goes wrong internally. [`try_layout`] exposes the underlying error instead.
//!
//! ```
//! use stratum::{Edge, LayoutDirection, Node, layout};
//!
//! let nodes = vec![Node::new("a"), Node::new("b")];
//! let edges = vec![Edge::new("a", "b")];
//! let result = layout(&nodes, &edges, LayoutDirection::TB);
//! let (a, b) = (result.position("a").unwrap(), result.position("b").unwrap());
//! assert!(a.y < b.y);
//! ```

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod build;
pub mod config;
pub mod coordinate_system;
pub mod diagram;
pub mod error;
pub mod greedy_fas;
pub mod handles;
pub mod model;
pub mod normalize;
pub mod order;
pub mod pack;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod routing;
pub mod util;
mod worker;

pub use config::{Acyclicer, HandlePolicy, LayoutOptions, Ranker};
pub use diagram::{
    Edge, EdgeRoute, Footprint, HandleSide, LayoutDirection, LayoutResult, MIN_FOOTPRINT, Node,
    ParseDirectionError, Point,
};
pub use error::{Error, Result};
pub use worker::{compute_async, layout_async};

use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, debug_span, warn};

/// Lays out `nodes` with default options in the given direction. Never fails.
pub fn layout(nodes: &[Node], edges: &[Edge], direction: LayoutDirection) -> LayoutResult {
    layout_with_options(nodes, edges, &LayoutOptions::with_direction(direction))
}

/// Like [`layout`] with explicit options. On any internal failure (including invalid options)
/// the input is returned unchanged.
pub fn layout_with_options(
    nodes: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
) -> LayoutResult {
    match guarded(|| try_layout(nodes, edges, options)) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "layout failed; returning nodes unchanged");
            LayoutResult::unchanged(nodes.to_vec(), edges.to_vec())
        }
    }
}

/// The fallible layout core.
pub fn try_layout(
    nodes: &[Node],
    edges: &[Edge],
    options: &LayoutOptions,
) -> Result<LayoutResult> {
    if nodes.is_empty() {
        return Ok(LayoutResult::unchanged(Vec::new(), edges.to_vec()));
    }
    options.validate()?;

    let _span = debug_span!(
        "layout",
        nodes = nodes.len(),
        edges = edges.len(),
        direction = %options.direction
    )
    .entered();

    let prepared = build::prepare(nodes, edges, options.default_footprint);
    if prepared.dangling > 0 {
        debug!(dangling = prepared.dangling, "ignoring edges with unknown endpoints");
    }
    if prepared.duplicate_ids > 0 {
        debug!(
            duplicates = prepared.duplicate_ids,
            "duplicate node ids laid out as isolated nodes"
        );
    }

    let mut layouts = Vec::with_capacity(prepared.components.len() + 1);
    for component in &prepared.components {
        layouts.push(pipeline::layout_component(component, &prepared, options)?);
    }
    if !prepared.isolated.nodes.is_empty() {
        layouts.push(pipeline::layout_component(
            &prepared.isolated,
            &prepared,
            options,
        )?);
    }
    debug!(
        components = prepared.components.len(),
        isolated = prepared.isolated.nodes.len(),
        "laid out components"
    );

    let packed = pack::pack(&layouts, nodes.len(), options);

    let mut out_nodes = nodes.to_vec();
    for (i, node) in out_nodes.iter_mut().enumerate() {
        let Some(center) = packed.centers[i] else {
            return Err(Error::Internal {
                message: format!("node `{}` was not placed", node.id),
            });
        };
        let fp = prepared.footprints[i];
        let top_left = Point::new(center.x - fp.width / 2.0, center.y - fp.height / 2.0);
        if !top_left.is_finite() {
            return Err(Error::NonFinitePosition {
                id: node.id.clone(),
            });
        }
        node.position = Some(top_left);
    }
    handles::assign(&mut out_nodes, options.direction, options.handle_policy);

    let routes = packed
        .routes
        .into_iter()
        .map(|(e, points)| EdgeRoute {
            edge: e,
            id: edges[e].id.clone(),
            points,
        })
        .collect();

    Ok(LayoutResult {
        nodes: out_nodes,
        edges: edges.to_vec(),
        routes,
    })
}

/// Runs `f`, turning a panic into [`Error::Internal`].
fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "layout panicked".to_string());
        Err(Error::Internal { message })
    })
}
