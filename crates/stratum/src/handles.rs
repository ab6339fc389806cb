//! Preferred connection sides derived from the layout direction.

use crate::config::HandlePolicy;
use crate::diagram::{LayoutDirection, Node};

/// Sets `source_position`/`target_position` on every node. Coordinates are not touched.
pub fn assign(nodes: &mut [Node], direction: LayoutDirection, policy: HandlePolicy) {
    let source = direction.source_side();
    let target = direction.target_side();
    for node in nodes {
        match policy {
            HandlePolicy::Reset => {
                node.source_position = Some(source);
                node.target_position = Some(target);
            }
            HandlePolicy::Preserve => {
                node.source_position.get_or_insert(source);
                node.target_position.get_or_insert(target);
            }
        }
    }
}
