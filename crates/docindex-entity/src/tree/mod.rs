//! Group tree entities: the per-user forest, its nodes, the path algebra,
//! and the annotated depth-first listing.

pub mod annotated;
pub mod model;
pub mod path;

pub use annotated::{AnnotatedNode, TraversalInfo, annotate};
pub use model::{CreateGroupNode, GroupNode, GroupTree, UpdateGroupNode};
