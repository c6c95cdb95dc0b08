//! Ordinary least-squares linear model
//!
//! Closed-form fit via the normal equations over a small fixed feature
//! count; no iterative solver, so results are fully deterministic.

use crate::error::{AnalysisError, Result};

/// Tiny diagonal damping keeping the normal matrix invertible when a scaled
/// feature column is constant (e.g. `ma_ratio` pinned at its guard value).
const RIDGE_EPSILON: f64 = 1e-9;

/// A fitted linear model with intercept
#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Fit `y ≈ w · x + b` by solving the normal equations.
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Result<Self> {
        if x.is_empty() || x.len() != y.len() {
            return Err(AnalysisError::MathError(
                "Training features and targets must be non-empty and of equal length".to_string(),
            ));
        }
        let k = x[0].len();
        if x.iter().any(|row| row.len() != k) {
            return Err(AnalysisError::MathError(
                "Training rows have inconsistent widths".to_string(),
            ));
        }

        // Augment each row with the intercept column, then accumulate
        // A = XᵀX and b = XᵀY.
        let m = k + 1;
        let mut a = vec![vec![0.0; m]; m];
        let mut b = vec![0.0; m];

        for (row, &target) in x.iter().zip(y) {
            let augmented = |i: usize| if i < k { row[i] } else { 1.0 };
            for i in 0..m {
                for j in 0..m {
                    a[i][j] += augmented(i) * augmented(j);
                }
                b[i] += augmented(i) * target;
            }
        }
        for (i, row) in a.iter_mut().enumerate() {
            row[i] += RIDGE_EPSILON;
        }

        let solution = solve(a, b)?;
        let intercept = solution[k];
        let mut weights = solution;
        weights.truncate(k);

        Ok(Self { weights, intercept })
    }

    /// Predict the target for one feature row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(row)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept
    }

    /// The fitted feature weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The fitted intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Gaussian elimination with partial pivoting over a dense square system.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let mut pivot = col;
        for row in (col + 1)..n {
            if a[row][col].abs() > a[pivot][col].abs() {
                pivot = row;
            }
        }
        if a[pivot][col].abs() < 1e-12 {
            return Err(AnalysisError::MathError(
                "Normal equations are singular".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for c in col..n {
                a[row][c] -= factor * a[col][c];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for c in (row + 1)..n {
            acc -= a[row][c] * x[c];
        }
        x[row] = acc / a[row][row];
    }

    Ok(x)
}
