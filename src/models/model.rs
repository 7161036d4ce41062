//! Model evaluation for the five curve families.

use crate::domain::FamilyKind;

/// Predict `ŷ(x)` for the given family.
///
/// Coefficient order is `[a, b]` for the two-parameter families and
/// `[a, b, c]` for quadratic.
///
/// # Panics
/// Panics if `coeffs` is shorter than the family's coefficient count.
pub fn predict(family: FamilyKind, x: f64, coeffs: &[f64]) -> f64 {
    match family {
        FamilyKind::Linear => coeffs[0] + coeffs[1] * x,
        FamilyKind::Quadratic => coeffs[0] + coeffs[1] * x + coeffs[2] * x * x,
        FamilyKind::Exponential => coeffs[0] * (coeffs[1] * x).exp(),
        FamilyKind::Logarithmic => coeffs[0] + coeffs[1] * x.ln(),
        FamilyKind::Power => coeffs[0] * x.powf(coeffs[1]),
    }
}
