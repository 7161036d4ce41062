//! Input/output helpers.
//!
//! - fit request JSON ingest (`export::read_request_json`)
//! - report JSON export (`export::write_report_json`)

pub mod export;

pub use export::*;
