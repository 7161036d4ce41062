//! Read fit requests and write report JSON.
//!
//! The report JSON is the "portable" representation of a batch run: one
//! record per requested family plus the selected best family. All numeric
//! values are plain JSON numbers.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::FitReport;
use crate::error::AppError;

/// A fit request document: `{"x": [...], "y": [...], "types": [...]}`.
///
/// `types` may be omitted; an empty list means "fit everything".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitRequest {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Read a fit request from a JSON file.
pub fn read_request_json(path: &Path) -> Result<FitRequest, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!(
            "Failed to open request JSON '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid request JSON: {e}")))
}

/// Write the full report as pretty JSON.
pub fn write_report_json(path: &Path, report: &FitReport) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create report JSON '{}': {e}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::io(format!("Failed to write report JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_with_and_without_types() {
        let request: FitRequest =
            serde_json::from_str(r#"{"x": [1, 2], "y": [3, 4], "types": ["linear"]}"#).unwrap();
        assert_eq!(request.x, vec![1.0, 2.0]);
        assert_eq!(request.types, vec!["linear".to_string()]);

        let request: FitRequest = serde_json::from_str(r#"{"x": [1], "y": [2]}"#).unwrap();
        assert!(request.types.is_empty());
    }

    #[test]
    fn report_json_round_trips_through_a_file() {
        let report = crate::fit::run_batch(
            &[1.0, 2.0, 3.0],
            &[2.0, 4.0, 6.0],
            &[crate::domain::FamilyKind::Linear],
        );
        let path = std::env::temp_dir().join("curvework-report-test.json");
        write_report_json(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["best"], "linear");
        assert_eq!(value["results"][0]["family"], "linear");
        std::fs::remove_file(&path).ok();
    }
}
