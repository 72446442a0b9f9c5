use crate::model::{AlignedDataset, Column};

pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    /// Calculates the Pearson correlation coefficient between two slices.
    /// Returns None if slices have different lengths, are empty or have no variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() != y.len() || x.is_empty() {
            return None;
        }
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;
        let numerator: f64 = x
            .iter()
            .zip(y.iter())
            .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
            .sum();
        let denominator_x: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
        let denominator_y: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
        let denominator = (denominator_x * denominator_y).sqrt();
        if denominator == 0.0 || !denominator.is_finite() {
            None
        } else {
            Some((numerator / denominator).clamp(-1.0, 1.0))
        }
    }

    /// Trailing-window Pearson correlation, aligned with the inputs.
    ///
    /// Entry `t` uses observations `t + 1 - window ..= t`, so the first
    /// `window - 1` entries are `None`. A window holding an undefined input
    /// is `None` as well.
    pub fn rolling(x: &[Option<f64>], y: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
        let len = x.len().min(y.len());
        let mut out = vec![None; len];
        if window == 0 {
            return out;
        }

        let mut xs = Vec::with_capacity(window);
        let mut ys = Vec::with_capacity(window);
        for end in window.saturating_sub(1)..len {
            xs.clear();
            ys.clear();
            for i in end + 1 - window..=end {
                match (x[i], y[i]) {
                    (Some(a), Some(b)) if a.is_finite() && b.is_finite() => {
                        xs.push(a);
                        ys.push(b);
                    }
                    _ => break,
                }
            }
            if xs.len() == window {
                out[end] = Self::pearson(&xs, &ys);
            }
        }
        out
    }

    /// Full-window correlation of the six level columns, ordered as `Column::ALL`.
    pub fn matrix(dataset: &AlignedDataset) -> Vec<Vec<Option<f64>>> {
        Column::ALL
            .iter()
            .map(|&a| {
                Column::ALL
                    .iter()
                    .map(|&b| Self::pearson(dataset.column(a), dataset.column(b)))
                    .collect()
            })
            .collect()
    }
}
