//! Two-parameter least-squares kernel.
//!
//! Every family that reduces to `v = a + b·u` after its transform shares
//! this solve. It works from the aggregate sums n, Σu, Σv, Σu², Σuv and the
//! closed-form normal-equation solution:
//!
//! ```text
//! b = (n·Σuv − Σu·Σv) / (n·Σu² − (Σu)²)
//! a = (Σv − b·Σu) / n
//! ```
//!
//! A denominator of exactly zero (all `u` identical, or a single point)
//! means the system admits no unique solution; the kernel reports a
//! singular-system error and produces no coefficients.

use crate::error::FitError;
use crate::num::sig6;

/// Display labels for the kernel's working variables.
///
/// Transformed families substitute their own labels so the trace reads
/// `Σln(y)` rather than `Σy`.
#[derive(Debug, Clone, Copy)]
pub struct VarLabels {
    pub u: &'static str,
    pub v: &'static str,
    pub u_sq: &'static str,
    pub uv: &'static str,
}

/// Aggregate sums feeding the two-parameter normal equations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelSums {
    pub n: usize,
    pub u: f64,
    pub v: f64,
    pub u_sq: f64,
    pub uv: f64,
}

/// A solved two-parameter system with its derivation trace.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelFit {
    pub intercept: f64,
    pub slope: f64,
    pub sums: KernelSums,
    pub steps: Vec<String>,
}

/// Solve `v = a + b·u` by least squares.
pub fn fit_line(u: &[f64], v: &[f64], labels: &VarLabels) -> Result<KernelFit, FitError> {
    let n = u.len();
    let su: f64 = u.iter().sum();
    let sv: f64 = v.iter().sum();
    let suu: f64 = u.iter().map(|&ui| ui * ui).sum();
    let suv: f64 = u.iter().zip(v).map(|(&ui, &vi)| ui * vi).sum();

    let denom = n as f64 * suu - su * su;
    if denom == 0.0 {
        return Err(FitError::SingularSystem);
    }

    let slope = (n as f64 * suv - su * sv) / denom;
    let intercept = (sv - slope * su) / n as f64;

    let VarLabels { u: lu, v: lv, u_sq: luu, uv: luv } = *labels;
    let steps = vec![
        format!("n = {n}"),
        format!("Σ{lu} = {}", sig6(su)),
        format!("Σ{lv} = {}", sig6(sv)),
        format!("Σ{luu} = {}", sig6(suu)),
        format!("Σ{luv} = {}", sig6(suv)),
        format!(
            "Formulas: b = (nΣ{luv} − (Σ{lu})(Σ{lv})) / (nΣ{luu} − (Σ{lu})²), a = (Σ{lv} − b·Σ{lu})/n"
        ),
        format!("Computed: b = {}, a = {}", sig6(slope), sig6(intercept)),
    ];

    Ok(KernelFit {
        intercept,
        slope,
        sums: KernelSums {
            n,
            u: su,
            v: sv,
            u_sq: suu,
            uv: suv,
        },
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const XY: VarLabels = VarLabels {
        u: "x",
        v: "y",
        u_sq: "x²",
        uv: "xy",
    };

    #[test]
    fn solves_exact_line() {
        // y = 2x
        let fit = fit_line(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &XY).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
        assert_eq!(fit.sums.n, 3);
        assert!((fit.sums.uv - 28.0).abs() < 1e-12);
    }

    #[test]
    fn constant_u_is_singular() {
        let err = fit_line(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0], &XY).unwrap_err();
        assert_eq!(err, FitError::SingularSystem);
    }

    #[test]
    fn single_point_is_singular() {
        let err = fit_line(&[2.0], &[3.0], &XY).unwrap_err();
        assert_eq!(err, FitError::SingularSystem);
    }

    #[test]
    fn trace_uses_caller_labels() {
        let labels = VarLabels {
            u: "x",
            v: "ln(y)",
            u_sq: "x²",
            uv: "x·ln(y)",
        };
        let fit = fit_line(&[1.0, 2.0, 3.0], &[0.5, 1.0, 1.5], &labels).unwrap();
        assert!(fit.steps.iter().any(|s| s.starts_with("Σln(y) = ")));
        assert!(fit.steps.iter().any(|s| s.starts_with("Σx·ln(y) = ")));
    }
}
