//! HTTP request handlers, one module per resource.

pub mod document;
pub mod group;
pub mod health;
pub mod source;
pub mod user;
