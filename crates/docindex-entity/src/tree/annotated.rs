//! Annotated depth-first listing for hierarchical rendering.
//!
//! Decorates a path-ordered node sequence with open/close depth markers so
//! a client can render indentation without reconstructing the tree.

use serde::{Deserialize, Serialize};

use crate::tree::model::GroupNode;

/// Depth markers attached to one node of an annotated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalInfo {
    /// Whether this node opens a deeper nesting level than the previous
    /// item (always true for the first item).
    pub open: bool,
    /// Nesting levels closed after this item, innermost first. Populated
    /// when the next item is shallower, and on the final item to close
    /// every level still open.
    pub close: Vec<u32>,
    /// Nesting level relative to the listing root (0-based).
    pub level: u32,
}

/// A group node paired with its traversal markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedNode {
    /// The node itself.
    pub group: GroupNode,
    /// Open/close/level markers.
    pub info: TraversalInfo,
}

/// Annotate a depth-first, path-ordered node sequence.
///
/// The input must be a pre-order traversal (ancestors before descendants,
/// siblings in order), which is exactly what a path range scan produces.
/// Every node is emitted exactly once.
pub fn annotate(nodes: Vec<GroupNode>) -> Vec<AnnotatedNode> {
    let mut result: Vec<AnnotatedNode> = Vec::with_capacity(nodes.len());
    let mut start_depth: Option<i64> = None;
    let mut prev_depth: Option<i64> = None;

    for node in nodes {
        let depth = node.depth;
        let start = *start_depth.get_or_insert(depth);

        let open = match prev_depth {
            None => true,
            Some(prev) => depth > prev,
        };
        if let Some(prev) = prev_depth {
            if depth < prev {
                // close the levels left behind on the previous item
                if let Some(last) = result.last_mut() {
                    last.info.close = (0..(prev - depth) as u32).collect();
                }
            }
        }

        result.push(AnnotatedNode {
            info: TraversalInfo {
                open,
                close: Vec::new(),
                level: (depth - start) as u32,
            },
            group: node,
        });
        prev_depth = Some(depth);
    }

    // the final item closes every level still open, back to the root level
    if let (Some(start), Some(prev)) = (start_depth, prev_depth) {
        if let Some(last) = result.last_mut() {
            last.info.close = (0..(prev - start + 1) as u32).collect();
        }
    }

    result
}
