//! # docindex-entity
//!
//! Domain entity models for the document index service: group trees and
//! their materialized-path nodes, documents, sources, and users.

pub mod document;
pub mod source;
pub mod tree;
pub mod user;
