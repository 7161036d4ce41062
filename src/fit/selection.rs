//! Best-fit selection across per-family records.

use crate::domain::{FamilyKind, FitRecord};

/// Pick the family with the highest R² among successful records.
///
/// The running best starts at negative infinity and only a strictly greater
/// score replaces it, so ties keep the first record in request order and a
/// NaN score never wins. Returns `None` when every family failed.
pub fn select_best(results: &[FitRecord]) -> Option<FamilyKind> {
    let mut best = None;
    let mut best_r2 = f64::NEG_INFINITY;
    for record in results {
        if let FitRecord::Fitted(fit) = record {
            if fit.r2 > best_r2 {
                best_r2 = fit.r2;
                best = Some(fit.family);
            }
        }
    }
    best
}
