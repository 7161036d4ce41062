//! Goodness-of-fit scoring.

/// Coefficient of determination, `R² = 1 − SS_res / SS_tot`.
///
/// When every observed value is identical, SS_tot is zero and the ratio is
/// undefined; the score is then defined as 1.0 for an exactly perfect
/// constant prediction and 0.0 otherwise.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> f64 {
    let mean = observed.iter().sum::<f64>() / observed.len() as f64;
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(&y, &y_hat)| (y - y_hat) * (y - y_hat))
        .sum();
    let ss_tot: f64 = observed.iter().map(|&y| (y - mean) * (y - mean)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_scores_one() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(r_squared(&y, &y), 1.0);
    }

    #[test]
    fn constant_observations_perfectly_predicted() {
        let y = [4.0, 4.0, 4.0];
        assert_eq!(r_squared(&y, &[4.0, 4.0, 4.0]), 1.0);
    }

    #[test]
    fn constant_observations_mispredicted_score_zero() {
        let y = [4.0, 4.0, 4.0];
        assert_eq!(r_squared(&y, &[4.0, 4.1, 4.0]), 0.0);
    }

    #[test]
    fn partial_fit_scores_between_zero_and_one() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let y_hat = [1.1, 1.9, 3.2, 3.8];
        let r2 = r_squared(&y, &y_hat);
        assert!(r2 > 0.9 && r2 < 1.0, "r2 = {r2}");
    }
}
