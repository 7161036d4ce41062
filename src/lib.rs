//! `curvework` library crate.
//!
//! Fits (x, y) observations to the standard curve families — linear,
//! quadratic, exponential, logarithmic, power — by solving least-squares
//! normal equations, and keeps the full derivation (working table, aggregate
//! sums, symbolic equations, solved values) so every result can be presented
//! as a worked solution.
//!
//! The binary (`cfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the engine stays free of I/O and presentation concerns
//!
//! ```
//! use curvework::domain::FamilyKind;
//! use curvework::fit::run_batch;
//!
//! let report = run_batch(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &FamilyKind::ALL);
//! assert_eq!(report.best, Some(FamilyKind::Linear));
//! ```

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod num;
pub mod report;
