//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - assembled in-memory during fitting
//! - exported to JSON for downstream consumers
//! - rendered as a worked solution in the terminal

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// The supported curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    Linear,
    Quadratic,
    Exponential,
    Logarithmic,
    Power,
}

impl FamilyKind {
    /// Every family, in canonical request order.
    pub const ALL: [FamilyKind; 5] = [
        FamilyKind::Linear,
        FamilyKind::Quadratic,
        FamilyKind::Exponential,
        FamilyKind::Logarithmic,
        FamilyKind::Power,
    ];

    /// Lowercase name used in requests and terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            FamilyKind::Linear => "linear",
            FamilyKind::Quadratic => "quadratic",
            FamilyKind::Exponential => "exponential",
            FamilyKind::Logarithmic => "logarithmic",
            FamilyKind::Power => "power",
        }
    }

    /// Canonical model formula.
    pub fn formula(self) -> &'static str {
        match self {
            FamilyKind::Linear => "y = a + b x",
            FamilyKind::Quadratic => "y = a + b x + c x^2",
            FamilyKind::Exponential => "y = a e^{b x}",
            FamilyKind::Logarithmic => "y = a + b ln(x)",
            FamilyKind::Power => "y = a x^b",
        }
    }

    /// Pedagogical prompt shown above the worked solution.
    pub fn question(self) -> &'static str {
        match self {
            FamilyKind::Linear => "Fit a straight line to the following data",
            FamilyKind::Quadratic => "Fit a quadratic curve to the following data",
            FamilyKind::Exponential => "Fit an exponential curve to the following data",
            FamilyKind::Logarithmic => "Fit a logarithmic curve to the following data",
            FamilyKind::Power => "Fit a power curve to the following data",
        }
    }

    /// Coefficient labels, in the order the solver produces them.
    pub fn coeff_names(self) -> &'static [&'static str] {
        match self {
            FamilyKind::Quadratic => &["a", "b", "c"],
            _ => &["a", "b"],
        }
    }

    /// Parse a requested family name (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<FamilyKind> {
        let name = name.trim();
        FamilyKind::ALL
            .iter()
            .copied()
            .find(|family| family.display_name().eq_ignore_ascii_case(name))
    }
}

/// A successfully fitted family, with the full derivation trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSuccess {
    pub family: FamilyKind,
    pub formula: &'static str,
    pub question: &'static str,
    /// Named coefficient values (`a`, `b`, and `c` for quadratic).
    pub coefficients: IndexMap<&'static str, f64>,
    /// The fitted model with solved values substituted in.
    pub equation: String,
    /// Coefficient of determination against the original y values.
    pub r2: f64,
    /// Ordered derivation steps.
    pub steps: Vec<String>,
    /// Column labels for the working table.
    pub columns: Vec<&'static str>,
    /// Working table, row-major, one value per column.
    pub table: Vec<Vec<f64>>,
    /// Aggregate sums feeding the normal equations.
    pub sums: IndexMap<&'static str, f64>,
    /// Symbolic normal equations.
    pub equations: Vec<String>,
    /// Substitution narrative (linear family only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub working: Vec<String>,
}

/// A family that could not be fitted.
///
/// Carries whatever partial working had been computed before the failure:
/// domain violations carry none, singular systems keep the pre-solve table
/// and sums for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitFailure {
    pub family: FamilyKind,
    pub formula: &'static str,
    pub error: FitError,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub table: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub sums: IndexMap<&'static str, f64>,
}

impl FitFailure {
    /// A failure record with no partial working attached.
    pub fn bare(family: FamilyKind, error: FitError) -> Self {
        Self {
            family,
            formula: family.formula(),
            error,
            steps: Vec::new(),
            columns: Vec::new(),
            table: Vec::new(),
            sums: IndexMap::new(),
        }
    }
}

/// Outcome of one family's solver run.
///
/// Serializes untagged, so consumers distinguish the two shapes by the
/// presence of `coefficients` vs `error` keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FitRecord {
    Fitted(FitSuccess),
    Failed(FitFailure),
}

impl FitRecord {
    pub fn family(&self) -> FamilyKind {
        match self {
            FitRecord::Fitted(fit) => fit.family,
            FitRecord::Failed(fail) => fail.family,
        }
    }

    /// Fit quality, if this family succeeded.
    pub fn r_squared(&self) -> Option<f64> {
        self.as_fitted().map(|fit| fit.r2)
    }

    pub fn as_fitted(&self) -> Option<&FitSuccess> {
        match self {
            FitRecord::Fitted(fit) => Some(fit),
            FitRecord::Failed(_) => None,
        }
    }

    pub fn as_failed(&self) -> Option<&FitFailure> {
        match self {
            FitRecord::Fitted(_) => None,
            FitRecord::Failed(fail) => Some(fail),
        }
    }
}

/// The aggregate report for one observation set: a record per requested
/// family, in request order, plus the winning family (if any succeeded).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub results: Vec<FitRecord>,
    pub best: Option<FamilyKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_names_round_trip() {
        for family in FamilyKind::ALL {
            assert_eq!(FamilyKind::from_name(family.display_name()), Some(family));
        }
        assert_eq!(FamilyKind::from_name("LINEAR"), Some(FamilyKind::Linear));
        assert_eq!(FamilyKind::from_name(" power "), Some(FamilyKind::Power));
        assert_eq!(FamilyKind::from_name("cubic"), None);
    }

    #[test]
    fn family_serializes_lowercase() {
        let json = serde_json::to_value(FamilyKind::Logarithmic).unwrap();
        assert_eq!(json, serde_json::Value::String("logarithmic".to_string()));
    }

    #[test]
    fn failure_record_has_no_coefficients_key() {
        let record = FitRecord::Failed(FitFailure::bare(
            FamilyKind::Exponential,
            FitError::NonPositiveY,
        ));
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.get("coefficients").is_none());
        assert!(obj.get("error").is_some());
        assert_eq!(obj["family"], "exponential");
    }

    #[test]
    fn empty_report_serializes_null_best() {
        let report = FitReport {
            results: Vec::new(),
            best: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["best"].is_null());
    }
}
