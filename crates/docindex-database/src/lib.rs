//! # docindex-database
//!
//! SQLite connection management and concrete repository implementations
//! for all document index entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::create_pool;
