//! Async entry points.
//!
//! Small graphs are laid out inline. Larger ones run on a dedicated thread and the result comes
//! back through a oneshot channel, so the caller's executor is not blocked. Dropping the returned
//! future drops the receiver; the worker's result is then discarded.

use crate::config::LayoutOptions;
use crate::diagram::{Edge, LayoutResult, Node};
use crate::error::{Error, Result};
use crate::{guarded, try_layout};
use futures::channel::oneshot;
use tracing::{debug, warn};

pub async fn compute_async(
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    options: LayoutOptions,
) -> Result<LayoutResult> {
    if nodes.len() < options.offload_min_nodes {
        return guarded(|| try_layout(&nodes, &edges, &options));
    }

    debug!(nodes = nodes.len(), "offloading layout to a worker thread");
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("stratum-layout".to_string())
        .spawn(move || {
            let result = guarded(|| try_layout(&nodes, &edges, &options));
            // The receiver is gone when the caller dropped the future.
            let _ = tx.send(result);
        })
        .map_err(|err| Error::Internal {
            message: format!("failed to spawn layout worker: {err}"),
        })?;

    rx.await.map_err(|_| Error::WorkerLost)?
}

/// Never-failing counterpart of [`compute_async`].
pub async fn layout_async(
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    options: LayoutOptions,
) -> LayoutResult {
    let fallback = LayoutResult::unchanged(nodes.clone(), edges.clone());
    match compute_async(nodes, edges, options).await {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "async layout failed; returning nodes unchanged");
            fallback
        }
    }
}
