//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - applies the transport-level input validation the engine assumes
//! - runs the fit batch
//! - prints the worked report or the score summary
//! - writes optional JSON exports

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs};
use crate::error::AppError;
use crate::fit::{resolve_families, run_batch};
use crate::io::export::{FitRequest, read_request_json, write_report_json};

/// Entry point for the `cfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Best(args) => handle_fit(args, OutputMode::ScoresOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    ScoresOnly,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let request = load_request(&args)?;
    let families = resolve_families(&request.types);
    let report = run_batch(&request.x, &request.y, &families);

    match mode {
        OutputMode::Full => println!("{}", crate::report::format_report(&report)),
        OutputMode::ScoresOnly => println!("{}", crate::report::format_scores(&report)),
    }

    if let Some(path) = &args.export {
        write_report_json(path, &report)?;
    }

    Ok(())
}

/// Build the request from flags or the `--input` JSON file, then validate it.
///
/// The engine assumes equal-length, non-empty, finite inputs; rejecting
/// malformed requests is this boundary's job.
fn load_request(args: &FitArgs) -> Result<FitRequest, AppError> {
    let request = match &args.input {
        Some(path) => {
            let mut request = read_request_json(path)?;
            if request.types.is_empty() {
                request.types = args.types.clone();
            }
            request
        }
        None => FitRequest {
            x: args.x.clone(),
            y: args.y.clone(),
            types: args.types.clone(),
        },
    };

    if request.x.is_empty() || request.x.len() != request.y.len() {
        return Err(AppError::usage(
            "Provide equal-length, non-empty 'x' and 'y' value lists.",
        ));
    }
    if request.x.iter().chain(&request.y).any(|v| !v.is_finite()) {
        return Err(AppError::usage("All x and y values must be finite numbers."));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(x: Vec<f64>, y: Vec<f64>) -> FitArgs {
        FitArgs {
            x,
            y,
            types: vec!["all".to_string()],
            input: None,
            export: None,
        }
    }

    #[test]
    fn mismatched_lengths_are_a_usage_error() {
        let err = load_request(&args(vec![1.0, 2.0], vec![1.0])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_inputs_are_a_usage_error() {
        let err = load_request(&args(vec![], vec![])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn non_finite_values_are_a_usage_error() {
        let err = load_request(&args(vec![1.0, f64::NAN], vec![1.0, 2.0])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn valid_inline_request_passes_through() {
        let request = load_request(&args(vec![1.0, 2.0], vec![3.0, 4.0])).unwrap();
        assert_eq!(request.x, vec![1.0, 2.0]);
        assert_eq!(request.types, vec!["all"]);
    }
}
