// Column transforms: z-score normalization and period-over-period changes

/// Z-score over the whole slice, using the sample standard deviation.
///
/// The mean and deviation come from the full window, so every point "sees"
/// later data. That is fine for display and wrong for backtesting.
/// Returns all `None` when there are fewer than two values or no variance.
pub fn zscore(values: &[f64]) -> Vec<Option<f64>> {
    let n = values.len();
    if n < 2 {
        return vec![None; n];
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 || !std_dev.is_finite() {
        return vec![None; n];
    }
    values.iter().map(|v| Some((v - mean) / std_dev)).collect()
}

/// Z-score of the negated series.
pub fn inverted_zscore(values: &[f64]) -> Vec<Option<f64>> {
    let negated: Vec<f64> = values.iter().map(|v| -v).collect();
    zscore(&negated)
}

/// `x[t] / x[t - periods] - 1`; undefined for the first `periods` rows or a zero base.
pub fn pct_change(values: &[f64], periods: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|t| {
            if periods == 0 || t < periods {
                return None;
            }
            let base = values[t - periods];
            if base == 0.0 {
                None
            } else {
                Some(values[t] / base - 1.0)
            }
        })
        .collect()
}

/// `x[t] - x[t - periods]`; undefined for the first `periods` rows.
pub fn diff(values: &[f64], periods: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|t| {
            if periods == 0 || t < periods {
                None
            } else {
                Some(values[t] - values[t - periods])
            }
        })
        .collect()
}

/// One-period returns with the leading undefined row dropped.
///
/// A zero price yields `None` further down the series.
pub fn returns(values: &[f64]) -> Vec<Option<f64>> {
    pct_change(values, 1).into_iter().skip(1).collect()
}
