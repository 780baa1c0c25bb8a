//! Repository implementations, one per entity.

pub mod document;
pub mod group;
pub mod source;
pub mod tree;
pub mod user;
