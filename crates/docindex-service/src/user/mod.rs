//! User attribution.

pub mod service;

pub use service::UserService;
