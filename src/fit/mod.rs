//! Fit orchestration.
//!
//! Responsibilities:
//!
//! - normalize the requested family list (`resolve_families`)
//! - evaluate each requested family independently, in parallel
//! - convert a panicking solver into that family's failure record
//! - select the best result (`selection`)

pub mod fitter;
pub mod selection;

pub use fitter::*;
pub use selection::*;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::domain::{FamilyKind, FitFailure, FitRecord, FitReport};
use crate::error::FitError;

/// Resolve a requested family-name list against the known families.
///
/// - an empty list or an `all` entry expands to every family
/// - unrecognized names are dropped (ASCII case-insensitive match)
/// - duplicates keep their first occurrence
/// - if nothing recognizable remains, the full set is substituted
pub fn resolve_families(requested: &[String]) -> Vec<FamilyKind> {
    if requested.is_empty()
        || requested.iter().any(|name| name.trim().eq_ignore_ascii_case("all"))
    {
        return FamilyKind::ALL.to_vec();
    }

    let mut families = Vec::new();
    for name in requested {
        if let Some(family) = FamilyKind::from_name(name) {
            if !families.contains(&family) {
                families.push(family);
            }
        }
    }

    if families.is_empty() {
        return FamilyKind::ALL.to_vec();
    }
    families
}

/// Fit every requested family and select the best result.
///
/// Inputs are assumed validated (equal length, non-empty) by the transport
/// layer. Families have no data dependencies on each other, so they are
/// evaluated in parallel; record order still matches `families`.
pub fn run_batch(x: &[f64], y: &[f64], families: &[FamilyKind]) -> FitReport {
    let results: Vec<FitRecord> = families
        .par_iter()
        .map(|&family| fit_family_guarded(family, x, y))
        .collect();
    let best = selection::select_best(&results);
    FitReport { results, best }
}

/// Run one family's solver behind a panic boundary.
///
/// An unexpected fault becomes that family's failure record; it never
/// aborts sibling families or the overall request.
fn fit_family_guarded(family: FamilyKind, x: &[f64], y: &[f64]) -> FitRecord {
    match panic::catch_unwind(AssertUnwindSafe(|| fitter::fit_family(family, x, y))) {
        Ok(record) => record,
        Err(payload) => FitRecord::Failed(FitFailure::bare(
            family,
            FitError::Internal(panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected fault".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_sentinel_expands_to_every_family() {
        assert_eq!(resolve_families(&names(&["all"])), FamilyKind::ALL.to_vec());
        assert_eq!(
            resolve_families(&names(&["linear", "all"])),
            FamilyKind::ALL.to_vec()
        );
        assert_eq!(resolve_families(&[]), FamilyKind::ALL.to_vec());
    }

    #[test]
    fn unrecognized_names_are_dropped() {
        assert_eq!(
            resolve_families(&names(&["quadratic", "cubic", "linear"])),
            vec![FamilyKind::Quadratic, FamilyKind::Linear]
        );
    }

    #[test]
    fn all_unrecognized_falls_back_to_every_family() {
        assert_eq!(
            resolve_families(&names(&["cubic", "quartic"])),
            FamilyKind::ALL.to_vec()
        );
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        assert_eq!(
            resolve_families(&names(&["power", "linear", "power"])),
            vec![FamilyKind::Power, FamilyKind::Linear]
        );
    }

    #[test]
    fn batch_returns_one_record_per_family_in_order() {
        let families = vec![FamilyKind::Power, FamilyKind::Linear, FamilyKind::Quadratic];
        let report = run_batch(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &families);
        assert_eq!(report.results.len(), 3);
        let order: Vec<FamilyKind> = report.results.iter().map(|r| r.family()).collect();
        assert_eq!(order, families);
    }

    #[test]
    fn batch_selects_linear_for_straight_line() {
        let report = run_batch(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &FamilyKind::ALL);
        assert_eq!(report.results.len(), 5);
        assert_eq!(report.best, Some(FamilyKind::Linear));
    }

    #[test]
    fn batch_with_all_families_failed_has_no_best() {
        // Constant x makes every family singular or domain-invalid.
        let report = run_batch(&[-1.0, -1.0, -1.0], &[1.0, 2.0, 3.0], &FamilyKind::ALL);
        assert_eq!(report.best, None);
        assert!(report.results.iter().all(|r| r.as_failed().is_some()));
    }

    #[test]
    fn panic_messages_are_extracted() {
        let payload = panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = panic::catch_unwind(|| panic!("{} {}", "a", "b")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "a b");
    }
}
