//! Per-family fitting routines.
//!
//! Each routine:
//!
//! - checks the family's domain precondition
//! - builds the working table and aggregate sums
//! - solves the normal equations (the shared two-parameter kernel, or a
//!   direct 3×3 solve for the quadratic family)
//! - back-transforms coefficients where a log transform was used
//! - scores the fit against the original y values and assembles the
//!   derivation trace

use indexmap::IndexMap;
use nalgebra::{Matrix3, Vector3};

use crate::domain::{FamilyKind, FitFailure, FitRecord, FitSuccess};
use crate::error::FitError;
use crate::math::kernel::{VarLabels, fit_line};
use crate::math::score::r_squared;
use crate::math::solve3::solve_3x3;
use crate::models::predict;
use crate::num::sig6;

const LINEAR_LABELS: VarLabels = VarLabels {
    u: "x",
    v: "y",
    u_sq: "x²",
    uv: "xy",
};
const EXP_LABELS: VarLabels = VarLabels {
    u: "x",
    v: "ln(y)",
    u_sq: "x²",
    uv: "x·ln(y)",
};
const LOG_LABELS: VarLabels = VarLabels {
    u: "ln(x)",
    v: "y",
    u_sq: "(ln x)²",
    uv: "ln(x)·y",
};
const POWER_LABELS: VarLabels = VarLabels {
    u: "ln(x)",
    v: "ln(y)",
    u_sq: "(ln x)²",
    uv: "ln(x)·ln(y)",
};

/// Fit one family against the observation set.
///
/// Inputs are assumed validated (equal length, non-empty) by the caller;
/// the family's own domain preconditions are checked here.
pub fn fit_family(family: FamilyKind, x: &[f64], y: &[f64]) -> FitRecord {
    match family {
        FamilyKind::Linear => fit_linear(x, y),
        FamilyKind::Quadratic => fit_quadratic(x, y),
        FamilyKind::Exponential => fit_exponential(x, y),
        FamilyKind::Logarithmic => fit_logarithmic(x, y),
        FamilyKind::Power => fit_power(x, y),
    }
}

fn fit_linear(x: &[f64], y: &[f64]) -> FitRecord {
    let family = FamilyKind::Linear;
    let n = x.len();

    let columns = vec!["x", "y", "xy", "x²"];
    let table: Vec<Vec<f64>> = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| vec![xi, yi, xi * yi, xi * xi])
        .collect();

    let sx: f64 = x.iter().sum();
    let sy: f64 = y.iter().sum();
    let sxy: f64 = x.iter().zip(y).map(|(&xi, &yi)| xi * yi).sum();
    let sxx: f64 = x.iter().map(|&xi| xi * xi).sum();
    let sums = IndexMap::from([
        ("n", n as f64),
        ("Σx", sx),
        ("Σy", sy),
        ("Σxy", sxy),
        ("Σx²", sxx),
    ]);

    let kernel = match fit_line(x, y, &LINEAR_LABELS) {
        Ok(kernel) => kernel,
        Err(error) => {
            return FitRecord::Failed(FitFailure {
                family,
                formula: family.formula(),
                error,
                steps: Vec::new(),
                columns,
                table,
                sums,
            });
        }
    };

    let (a, b) = (kernel.intercept, kernel.slope);
    let coeffs = [a, b];
    let y_hat: Vec<f64> = x.iter().map(|&xi| predict(family, xi, &coeffs)).collect();
    let r2 = r_squared(y, &y_hat);

    let equations = vec![
        "Σy = n·a + b·Σx".to_string(),
        "Σxy = a·Σx + b·Σx²".to_string(),
    ];
    let working = vec![
        "Let the best fitted straight line be y = a + b x".to_string(),
        format!("Substitute values: Σy={} = {n}·a + {}·b", sig6(sy), sig6(sx)),
        format!("and Σxy={} = {}·a + {}·b", sig6(sxy), sig6(sx), sig6(sxx)),
        format!(
            "Solve → b = {}, then a = (Σy − b·Σx)/n = ({} − {}·{})/{n} = {}",
            sig6(b),
            sig6(sy),
            sig6(b),
            sig6(sx),
            sig6(a)
        ),
    ];

    FitRecord::Fitted(FitSuccess {
        family,
        formula: family.formula(),
        question: family.question(),
        coefficients: coeff_map(family, &coeffs),
        equation: format!("y = {} + {} x", sig6(a), sig6(b)),
        r2,
        steps: kernel.steps,
        columns,
        table,
        sums,
        equations,
        working,
    })
}

fn fit_quadratic(x: &[f64], y: &[f64]) -> FitRecord {
    let family = FamilyKind::Quadratic;
    let n = x.len();

    let columns = vec!["x", "y"];
    let table: Vec<Vec<f64>> = x.iter().zip(y).map(|(&xi, &yi)| vec![xi, yi]).collect();

    let sx: f64 = x.iter().sum();
    let sx2: f64 = x.iter().map(|&xi| xi * xi).sum();
    let sx3: f64 = x.iter().map(|&xi| xi * xi * xi).sum();
    let sx4: f64 = x.iter().map(|&xi| xi * xi * xi * xi).sum();
    let sy: f64 = y.iter().sum();
    let sxy: f64 = x.iter().zip(y).map(|(&xi, &yi)| xi * yi).sum();
    let sx2y: f64 = x.iter().zip(y).map(|(&xi, &yi)| xi * xi * yi).sum();
    let sums = IndexMap::from([
        ("n", n as f64),
        ("Σx", sx),
        ("Σx²", sx2),
        ("Σx³", sx3),
        ("Σx⁴", sx4),
        ("Σy", sy),
        ("Σxy", sxy),
        ("Σx²y", sx2y),
    ]);

    let m = Matrix3::new(n as f64, sx, sx2, sx, sx2, sx3, sx2, sx3, sx4);
    let rhs = Vector3::new(sy, sxy, sx2y);
    let Some(sol) = solve_3x3(m, rhs) else {
        return FitRecord::Failed(FitFailure {
            family,
            formula: family.formula(),
            error: FitError::SingularQuadratic,
            steps: Vec::new(),
            columns,
            table,
            sums,
        });
    };
    let (a, b, c) = (sol[0], sol[1], sol[2]);

    let coeffs = [a, b, c];
    let y_hat: Vec<f64> = x.iter().map(|&xi| predict(family, xi, &coeffs)).collect();
    let r2 = r_squared(y, &y_hat);

    let equations = vec![
        "Σy = n·a + b·Σx + c·Σx²".to_string(),
        "Σxy = a·Σx + b·Σx² + c·Σx³".to_string(),
        "Σx²y = a·Σx² + b·Σx³ + c·Σx⁴".to_string(),
    ];
    let mut steps = vec![
        format!("n = {n}"),
        format!("Σx = {}", sig6(sx)),
        format!("Σx² = {}", sig6(sx2)),
        format!("Σx³ = {}", sig6(sx3)),
        format!("Σx⁴ = {}", sig6(sx4)),
        format!("Σy = {}", sig6(sy)),
        format!("Σxy = {}", sig6(sxy)),
        format!("Σx²y = {}", sig6(sx2y)),
        "Normal equations:".to_string(),
    ];
    steps.extend(equations.iter().cloned());
    steps.push("Solve the 3×3 system for a, b, c.".to_string());
    steps.push(format!(
        "Computed: a = {}, b = {}, c = {}",
        sig6(a),
        sig6(b),
        sig6(c)
    ));

    FitRecord::Fitted(FitSuccess {
        family,
        formula: family.formula(),
        question: family.question(),
        coefficients: coeff_map(family, &coeffs),
        equation: format!("y = {} + {} x + {} x^2", sig6(a), sig6(b), sig6(c)),
        r2,
        steps,
        columns,
        table,
        sums,
        equations,
        working: Vec::new(),
    })
}

fn fit_exponential(x: &[f64], y: &[f64]) -> FitRecord {
    let family = FamilyKind::Exponential;
    if y.iter().any(|&yi| yi <= 0.0) {
        return domain_failure(
            family,
            FitError::NonPositiveY,
            "Check: all y must be positive for ln(y).",
        );
    }

    let n = x.len();
    let ln_y: Vec<f64> = y.iter().map(|yi| yi.ln()).collect();

    let columns = vec!["x", "y", "ln(y)", "x·ln(y)", "x²"];
    let table: Vec<Vec<f64>> = x
        .iter()
        .zip(y)
        .zip(&ln_y)
        .map(|((&xi, &yi), &li)| vec![xi, yi, li, xi * li, xi * xi])
        .collect();

    let sx: f64 = x.iter().sum();
    let sx2: f64 = x.iter().map(|&xi| xi * xi).sum();
    let slny: f64 = ln_y.iter().sum();
    let sxlny: f64 = x.iter().zip(&ln_y).map(|(&xi, &li)| xi * li).sum();
    let sums = IndexMap::from([
        ("n", n as f64),
        ("Σx", sx),
        ("Σx²", sx2),
        ("Σln(y)", slny),
        ("Σx·ln(y)", sxlny),
    ]);

    let kernel = match fit_line(x, &ln_y, &EXP_LABELS) {
        Ok(kernel) => kernel,
        Err(error) => {
            return FitRecord::Failed(FitFailure {
                family,
                formula: family.formula(),
                error,
                steps: Vec::new(),
                columns,
                table,
                sums,
            });
        }
    };

    let ln_a = kernel.intercept;
    let b = kernel.slope;
    let a = ln_a.exp();
    let coeffs = [a, b];
    let y_hat: Vec<f64> = x.iter().map(|&xi| predict(family, xi, &coeffs)).collect();
    let r2 = r_squared(y, &y_hat);

    let equations = vec![
        "Σln(y) = n·ln(a) + b·Σx".to_string(),
        "Σx·ln(y) = ln(a)·Σx + b·Σx²".to_string(),
    ];
    let steps = vec![
        "Take logs: ln(y) = ln(a) + b x".to_string(),
        "Normal equations on ln(y) vs x:".to_string(),
        equations[0].clone(),
        equations[1].clone(),
        format!(
            "With values: {} = {n}·ln(a) + {}·b and {} = ln(a)·{} + b·{}",
            sig6(slny),
            sig6(sx),
            sig6(sxlny),
            sig6(sx),
            sig6(sx2)
        ),
        format!(
            "Solve → ln(a) = {}, b = {}; so a = e^ln(a) = {}",
            sig6(ln_a),
            sig6(b),
            sig6(a)
        ),
    ];

    FitRecord::Fitted(FitSuccess {
        family,
        formula: family.formula(),
        question: family.question(),
        coefficients: coeff_map(family, &coeffs),
        equation: format!("y = {} e^({} x)", sig6(a), sig6(b)),
        r2,
        steps,
        columns,
        table,
        sums,
        equations,
        working: Vec::new(),
    })
}

fn fit_logarithmic(x: &[f64], y: &[f64]) -> FitRecord {
    let family = FamilyKind::Logarithmic;
    if x.iter().any(|&xi| xi <= 0.0) {
        return domain_failure(
            family,
            FitError::NonPositiveX,
            "Check: all x must be positive for ln(x).",
        );
    }

    let n = x.len();
    let u: Vec<f64> = x.iter().map(|xi| xi.ln()).collect();

    let columns = vec!["x", "y", "ln(x)", "ln(x)·y", "(ln x)²"];
    let table: Vec<Vec<f64>> = x
        .iter()
        .zip(y)
        .zip(&u)
        .map(|((&xi, &yi), &ui)| vec![xi, yi, ui, ui * yi, ui * ui])
        .collect();

    let su: f64 = u.iter().sum();
    let su2: f64 = u.iter().map(|&ui| ui * ui).sum();
    let sy: f64 = y.iter().sum();
    let suy: f64 = u.iter().zip(y).map(|(&ui, &yi)| ui * yi).sum();
    let sums = IndexMap::from([
        ("n", n as f64),
        ("Σln(x)", su),
        ("Σ(ln x)²", su2),
        ("Σy", sy),
        ("Σln(x)·y", suy),
    ]);

    let kernel = match fit_line(&u, y, &LOG_LABELS) {
        Ok(kernel) => kernel,
        Err(error) => {
            return FitRecord::Failed(FitFailure {
                family,
                formula: family.formula(),
                error,
                steps: Vec::new(),
                columns,
                table,
                sums,
            });
        }
    };

    let (a, b) = (kernel.intercept, kernel.slope);
    let coeffs = [a, b];
    let y_hat: Vec<f64> = x.iter().map(|&xi| predict(family, xi, &coeffs)).collect();
    let r2 = r_squared(y, &y_hat);

    let equations = vec![
        "Σy = n·a + b·Σln(x)".to_string(),
        "Σln(x)·y = a·Σln(x) + b·Σ(ln x)²".to_string(),
    ];
    let steps = vec![
        "Let u = ln(x), then y = a + b·u".to_string(),
        "Normal equations:".to_string(),
        "Σy = n·a + b·Σu".to_string(),
        "Σu·y = a·Σu + b·Σu²".to_string(),
        format!(
            "Values: Σy={}, Σu={}, Σu²={}, Σu·y={}",
            sig6(sy),
            sig6(su),
            sig6(su2),
            sig6(suy)
        ),
        format!("Solve → a = {}, b = {}", sig6(a), sig6(b)),
    ];

    FitRecord::Fitted(FitSuccess {
        family,
        formula: family.formula(),
        question: family.question(),
        coefficients: coeff_map(family, &coeffs),
        equation: format!("y = {} + {} ln(x)", sig6(a), sig6(b)),
        r2,
        steps,
        columns,
        table,
        sums,
        equations,
        working: Vec::new(),
    })
}

fn fit_power(x: &[f64], y: &[f64]) -> FitRecord {
    let family = FamilyKind::Power;
    if x.iter().any(|&xi| xi <= 0.0) || y.iter().any(|&yi| yi <= 0.0) {
        return domain_failure(
            family,
            FitError::NonPositiveXOrY,
            "Check: all x and y must be positive for ln(x), ln(y).",
        );
    }

    let n = x.len();
    let u: Vec<f64> = x.iter().map(|xi| xi.ln()).collect();
    let v: Vec<f64> = y.iter().map(|yi| yi.ln()).collect();

    let columns = vec!["x", "y", "ln(x)", "ln(y)", "ln(x)·ln(y)", "(ln x)²"];
    let table: Vec<Vec<f64>> = x
        .iter()
        .zip(y)
        .zip(u.iter().zip(&v))
        .map(|((&xi, &yi), (&ui, &vi))| vec![xi, yi, ui, vi, ui * vi, ui * ui])
        .collect();

    let su: f64 = u.iter().sum();
    let su2: f64 = u.iter().map(|&ui| ui * ui).sum();
    let sv: f64 = v.iter().sum();
    let suv: f64 = u.iter().zip(&v).map(|(&ui, &vi)| ui * vi).sum();
    let sums = IndexMap::from([
        ("n", n as f64),
        ("Σln(x)", su),
        ("Σ(ln x)²", su2),
        ("Σln(y)", sv),
        ("Σln(x)·ln(y)", suv),
    ]);

    let kernel = match fit_line(&u, &v, &POWER_LABELS) {
        Ok(kernel) => kernel,
        Err(error) => {
            return FitRecord::Failed(FitFailure {
                family,
                formula: family.formula(),
                error,
                steps: Vec::new(),
                columns,
                table,
                sums,
            });
        }
    };

    let ln_a = kernel.intercept;
    let b = kernel.slope;
    let a = ln_a.exp();
    let coeffs = [a, b];
    let y_hat: Vec<f64> = x.iter().map(|&xi| predict(family, xi, &coeffs)).collect();
    let r2 = r_squared(y, &y_hat);

    let equations = vec![
        "Σln(y) = n·ln(a) + b·Σln(x)".to_string(),
        "Σln(x)·ln(y) = ln(a)·Σln(x) + b·Σ(ln x)²".to_string(),
    ];
    let steps = vec![
        "Take logs: ln(y) = ln(a) + b·ln(x)".to_string(),
        "Normal equations:".to_string(),
        equations[0].clone(),
        equations[1].clone(),
        format!(
            "Values: Σln(y)={}, Σln(x)={}, Σ(ln x)²={}, Σln(x)·ln(y)={}",
            sig6(sv),
            sig6(su),
            sig6(su2),
            sig6(suv)
        ),
        format!(
            "Solve → ln(a) = {}, b = {}; so a = e^ln(a) = {}",
            sig6(ln_a),
            sig6(b),
            sig6(a)
        ),
    ];

    FitRecord::Fitted(FitSuccess {
        family,
        formula: family.formula(),
        question: family.question(),
        coefficients: coeff_map(family, &coeffs),
        equation: format!("y = {} x^{}", sig6(a), sig6(b)),
        r2,
        steps,
        columns,
        table,
        sums,
        equations,
        working: Vec::new(),
    })
}

fn coeff_map(family: FamilyKind, coeffs: &[f64]) -> IndexMap<&'static str, f64> {
    family
        .coeff_names()
        .iter()
        .copied()
        .zip(coeffs.iter().copied())
        .collect()
}

fn domain_failure(family: FamilyKind, error: FitError, check: &str) -> FitRecord {
    let mut failure = FitFailure::bare(family, error);
    failure.steps.push(check.to_string());
    FitRecord::Failed(failure)
}
