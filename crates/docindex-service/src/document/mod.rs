//! Document ledger.

pub mod service;

pub use service::DocumentService;
