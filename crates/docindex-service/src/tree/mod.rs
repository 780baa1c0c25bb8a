//! Group tree management.

pub mod service;

pub use service::{ROOT_PARENT, TreeService};
