//! # docindex-api
//!
//! HTTP API layer: Axum router, request/response DTOs, handlers, and the
//! gateway identity extractor.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
