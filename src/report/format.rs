//! Formatted terminal output for fit reports.

use indexmap::IndexMap;

use crate::domain::{FitFailure, FitRecord, FitReport, FitSuccess};
use crate::num::sig6;

/// Render the full worked report: one section per family, then the best-fit
/// line.
pub fn format_report(report: &FitReport) -> String {
    let mut out = String::new();
    for record in &report.results {
        match record {
            FitRecord::Fitted(fit) => out.push_str(&format_success(fit)),
            FitRecord::Failed(failure) => out.push_str(&format_failure(failure)),
        }
        out.push('\n');
    }
    out.push_str(&format_best_line(report));
    out
}

/// Render per-family scores and the winner only.
pub fn format_scores(report: &FitReport) -> String {
    let mut out = String::new();
    out.push_str("Family scores:\n");
    for record in &report.results {
        match record {
            FitRecord::Fitted(fit) => {
                let marker = if report.best == Some(fit.family) { '*' } else { ' ' };
                out.push_str(&format!(
                    "{marker} {:<12} R² = {}\n",
                    fit.family.display_name(),
                    sig6(fit.r2)
                ));
            }
            FitRecord::Failed(failure) => {
                out.push_str(&format!(
                    "  {:<12} failed: {}\n",
                    failure.family.display_name(),
                    failure.error
                ));
            }
        }
    }
    out.push('\n');
    out.push_str(&format_best_line(report));
    out
}

fn format_success(fit: &FitSuccess) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {}: {} ===\n",
        fit.family.display_name(),
        fit.formula
    ));
    out.push_str(&format!("{}\n\n", fit.question));

    out.push_str(&format_table(&fit.columns, &fit.table));
    out.push_str(&format!("Sums: {}\n", format_sums(&fit.sums)));

    out.push_str("Normal equations:\n");
    for equation in &fit.equations {
        out.push_str(&format!("  {equation}\n"));
    }

    out.push_str("Steps:\n");
    for (i, step) in fit.steps.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }

    if !fit.working.is_empty() {
        out.push_str("Working:\n");
        for line in &fit.working {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out.push_str(&format!("Equation: {}\n", fit.equation));
    out.push_str(&format!("R² = {}\n", sig6(fit.r2)));
    out
}

fn format_failure(failure: &FitFailure) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== {}: {} ===\n",
        failure.family.display_name(),
        failure.formula
    ));
    out.push_str(&format!("Error: {}\n", failure.error));
    for step in &failure.steps {
        out.push_str(&format!("  {step}\n"));
    }
    if !failure.table.is_empty() {
        out.push_str(&format_table(&failure.columns, &failure.table));
    }
    if !failure.sums.is_empty() {
        out.push_str(&format!("Partial sums: {}\n", format_sums(&failure.sums)));
    }
    out
}

fn format_best_line(report: &FitReport) -> String {
    match report.best {
        Some(best) => {
            let r2 = report
                .results
                .iter()
                .filter_map(FitRecord::as_fitted)
                .find(|fit| fit.family == best)
                .map(|fit| fit.r2);
            match r2 {
                Some(r2) => format!("Best fit: {} (R² = {})\n", best.display_name(), sig6(r2)),
                None => format!("Best fit: {}\n", best.display_name()),
            }
        }
        None => "Best fit: none (no family produced a successful fit)\n".to_string(),
    }
}

fn format_sums(sums: &IndexMap<&'static str, f64>) -> String {
    sums.iter()
        .map(|(label, &value)| format!("{label} = {}", sig6(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Right-aligned numeric table with a header row.
fn format_table(columns: &[&'static str], rows: &[Vec<f64>]) -> String {
    if columns.is_empty() || rows.is_empty() {
        return String::new();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|&v| sig6(v)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (j, cell) in row.iter().enumerate() {
            if j < widths.len() {
                widths[j] = widths[j].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    for (j, column) in columns.iter().enumerate() {
        if j > 0 {
            out.push_str("  ");
        }
        out.push_str(&pad(column, widths[j]));
    }
    out.push('\n');
    for row in &cells {
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                out.push_str("  ");
            }
            let width = widths.get(j).copied().unwrap_or(0);
            out.push_str(&pad(cell, width));
        }
        out.push('\n');
    }
    out
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = String::with_capacity(width + s.len());
    for _ in len..width {
        out.push(' ');
    }
    out.push_str(s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FamilyKind;
    use crate::fit::run_batch;

    #[test]
    fn report_names_every_family_and_the_winner() {
        let report = run_batch(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &FamilyKind::ALL);
        let text = format_report(&report);
        for family in FamilyKind::ALL {
            assert!(
                text.contains(&format!("=== {}:", family.display_name())),
                "missing section for {}",
                family.display_name()
            );
        }
        assert!(text.contains("Best fit: linear"));
    }

    #[test]
    fn scores_mark_the_best_family() {
        let report = run_batch(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &FamilyKind::ALL);
        let text = format_scores(&report);
        assert!(text.contains("* linear"));
        assert!(text.contains("Best fit: linear (R² = 1)"));
    }

    #[test]
    fn all_failed_report_says_none() {
        let report = run_batch(
            &[-1.0, -1.0, -1.0],
            &[1.0, 2.0, 3.0],
            &[FamilyKind::Logarithmic, FamilyKind::Power],
        );
        let text = format_report(&report);
        assert!(text.contains("Best fit: none"));
        assert!(text.contains("Error: "));
    }
}
