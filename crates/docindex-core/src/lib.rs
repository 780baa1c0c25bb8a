//! # docindex-core
//!
//! Core configuration schemas, error types, and the shared result alias
//! for the document index service.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
