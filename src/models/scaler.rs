//! Min-max feature scaling

/// Column-wise min-max scaler mapping observed values to [0, 1]
///
/// Fitted on the training rows only; a constant column maps to 0.0 rather
/// than dividing by a zero range.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    mins: Vec<f64>,
    ranges: Vec<f64>,
}

impl MinMaxScaler {
    /// Fit a scaler over rows of equal width.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut mins = vec![f64::INFINITY; width];
        let mut maxs = vec![f64::NEG_INFINITY; width];

        for row in rows {
            for (c, &v) in row.iter().enumerate() {
                if v < mins[c] {
                    mins[c] = v;
                }
                if v > maxs[c] {
                    maxs[c] = v;
                }
            }
        }

        let ranges = mins
            .iter()
            .zip(&maxs)
            .map(|(lo, hi)| hi - lo)
            .collect();

        Self { mins, ranges }
    }

    /// Fit a single-column scaler.
    pub fn fit_column(values: &[f64]) -> Self {
        Self::fit(&values.iter().map(|&v| vec![v]).collect::<Vec<_>>())
    }

    /// Scale one row. Values outside the fitted range extrapolate linearly,
    /// matching how a fitted scaler behaves on unseen data.
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(c, &v)| {
                if self.ranges[c] > 0.0 {
                    (v - self.mins[c]) / self.ranges[c]
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Scale one value with a single-column scaler.
    pub fn transform_value(&self, value: f64) -> f64 {
        self.transform(&[value])[0]
    }

    /// Invert the scaling of one value from a single-column scaler.
    pub fn inverse_value(&self, scaled: f64) -> f64 {
        scaled * self.ranges[0] + self.mins[0]
    }
}
