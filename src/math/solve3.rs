//! Direct 3×3 linear solve for the quadratic normal equations.

use nalgebra::{Matrix3, Vector3};

/// Solve `m · x = rhs` by LU decomposition.
///
/// Returns `None` when the matrix is singular or the solution is not
/// finite; callers report that as a singular quadratic system.
pub fn solve_3x3(m: Matrix3<f64>, rhs: Vector3<f64>) -> Option<Vector3<f64>> {
    let sol = m.lu().solve(&rhs)?;
    if sol.iter().all(|v| v.is_finite()) {
        Some(sol)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_well_conditioned_system() {
        // x = [1, 2, 3]
        let m = Matrix3::new(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0);
        let rhs = Vector3::new(2.0, 6.0, 12.0);
        let sol = solve_3x3(m, rhs).unwrap();
        assert!((sol[0] - 1.0).abs() < 1e-12);
        assert!((sol[1] - 2.0).abs() < 1e-12);
        assert!((sol[2] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rank_deficient_matrix_returns_none() {
        // Rows are proportional.
        let m = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0);
        let rhs = Vector3::new(1.0, 2.0, 3.0);
        assert!(solve_3x3(m, rhs).is_none());
    }
}
