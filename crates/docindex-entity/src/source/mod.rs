//! Source entity.

pub mod model;

pub use model::{CreateSource, Source, UpdateSource};
