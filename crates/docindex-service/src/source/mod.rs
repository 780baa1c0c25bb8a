//! Source ledger.

pub mod service;

pub use service::SourceService;
