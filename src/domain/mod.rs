//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the curve family enumeration (`FamilyKind`)
//! - per-family fit outcomes (`FitRecord`, `FitSuccess`, `FitFailure`)
//! - the aggregate report (`FitReport`)

pub mod types;

pub use types::*;
