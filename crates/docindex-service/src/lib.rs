//! # docindex-service
//!
//! Business logic services for the document index: the group tree
//! manager, the document/source ledger, and user attribution.

pub mod context;
pub mod document;
pub mod source;
pub mod tree;
pub mod user;

pub use context::RequestContext;
