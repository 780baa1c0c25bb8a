//! Document entity.

pub mod model;

pub use model::{CreateDocument, Document, UpdateDocument};
