use crate::analyzer::CorrelationAnalyzer;
use crate::config::AppConfig;
use crate::model::AlignedDataset;
use crate::normalizer::{diff, inverted_zscore, pct_change, returns, zscore};
use chrono::NaiveDate;

/// Derived series computed from the aligned dataset.
///
/// Row-indexed series share `AlignedDataset::dates`. Rolling correlations are
/// built on one-period returns, which lose the first row, so they are indexed
/// by `correlation_dates` (= `dates[1..]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub correlation_window: usize,
    pub z_net_liquidity: Vec<Option<f64>>,
    pub z_btc: Vec<Option<f64>>,
    pub z_nasdaq: Vec<Option<f64>>,
    pub z_dollar_inverted: Vec<Option<f64>>,
    /// Percent change of net liquidity over `liquidity_trend_periods`, times 100.
    pub liquidity_change: Vec<Option<f64>>,
    pub correlation_dates: Vec<NaiveDate>,
    pub corr_liquidity_btc: Vec<Option<f64>>,
    pub corr_liquidity_nasdaq: Vec<Option<f64>>,
    pub corr_dollar_btc: Vec<Option<f64>>,
    pub corr_spread_sp500: Vec<Option<f64>>,
    /// Equity up and credit spread widening over the same span.
    pub divergence: Vec<bool>,
    pub correlation_matrix: Vec<Vec<Option<f64>>>,
}

impl Statistics {
    pub fn compute(dataset: &AlignedDataset, config: &AppConfig) -> Self {
        let window = config.correlation_window;

        let net_liq_returns = returns(&dataset.net_liquidity);
        let btc_returns = returns(&dataset.btc);
        let nasdaq_returns = returns(&dataset.nasdaq);
        let dxy_returns = returns(&dataset.dollar_index);
        let hy_returns = returns(&dataset.hy_spread);
        let sp_returns = returns(&dataset.sp500);

        let liquidity_change = pct_change(&dataset.net_liquidity, config.liquidity_trend_periods)
            .into_iter()
            .map(|v| v.map(|p| p * 100.0))
            .collect();

        Self {
            correlation_window: window,
            z_net_liquidity: zscore(&dataset.net_liquidity),
            z_btc: zscore(&dataset.btc),
            z_nasdaq: zscore(&dataset.nasdaq),
            z_dollar_inverted: inverted_zscore(&dataset.dollar_index),
            liquidity_change,
            correlation_dates: dataset.dates.iter().skip(1).copied().collect(),
            corr_liquidity_btc: CorrelationAnalyzer::rolling(
                &net_liq_returns,
                &btc_returns,
                window,
            ),
            corr_liquidity_nasdaq: CorrelationAnalyzer::rolling(
                &net_liq_returns,
                &nasdaq_returns,
                window,
            ),
            corr_dollar_btc: CorrelationAnalyzer::rolling(&dxy_returns, &btc_returns, window),
            corr_spread_sp500: CorrelationAnalyzer::rolling(&hy_returns, &sp_returns, window),
            divergence: divergence_flags(
                &dataset.sp500,
                &dataset.hy_spread,
                config.divergence_periods,
            ),
            correlation_matrix: CorrelationAnalyzer::matrix(dataset),
        }
    }

    /// Number of divergence rows among the last `rows` rows.
    pub fn recent_divergence_count(&self, rows: usize) -> usize {
        let start = self.divergence.len().saturating_sub(rows);
        self.divergence[start..].iter().filter(|&&d| d).count()
    }
}

/// `pct_change(sp500) > 0 && diff(spread) > 0` per row; undefined rows are false.
pub fn divergence_flags(sp500: &[f64], hy_spread: &[f64], periods: usize) -> Vec<bool> {
    let sp_ret = pct_change(sp500, periods);
    let hy_change = diff(hy_spread, periods);
    sp_ret
        .iter()
        .zip(hy_change.iter())
        .map(|(s, h)| matches!((s, h), (Some(s), Some(h)) if *s > 0.0 && *h > 0.0))
        .collect()
}

/// Latest row of data and statistics, as consumed by the summary and signals.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestSnapshot {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub net_liquidity: f64,
    pub liquidity_change: Option<f64>,
    pub dollar_index: f64,
    pub hy_spread: f64,
    pub btc: f64,
    pub nasdaq: f64,
    pub sp500: f64,
    pub corr_liquidity_btc: Option<f64>,
    pub corr_liquidity_nasdaq: Option<f64>,
    pub corr_dollar_btc: Option<f64>,
    pub corr_spread_sp500: Option<f64>,
    pub recent_divergence: usize,
}

impl LatestSnapshot {
    /// `None` for an empty dataset.
    pub fn from_analysis(
        dataset: &AlignedDataset,
        stats: &Statistics,
        divergence_rows: usize,
    ) -> Option<Self> {
        let last = |v: &[Option<f64>]| v.last().copied().flatten();
        Some(Self {
            start: dataset.first_date()?,
            end: dataset.last_date()?,
            net_liquidity: *dataset.net_liquidity.last()?,
            liquidity_change: last(&stats.liquidity_change),
            dollar_index: *dataset.dollar_index.last()?,
            hy_spread: *dataset.hy_spread.last()?,
            btc: *dataset.btc.last()?,
            nasdaq: *dataset.nasdaq.last()?,
            sp500: *dataset.sp500.last()?,
            corr_liquidity_btc: last(&stats.corr_liquidity_btc),
            corr_liquidity_nasdaq: last(&stats.corr_liquidity_nasdaq),
            corr_dollar_btc: last(&stats.corr_dollar_btc),
            corr_spread_sp500: last(&stats.corr_spread_sp500),
            recent_divergence: stats.recent_divergence_count(divergence_rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(from: f64, to: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| from + (to - from) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn test_divergence_equity_up_spread_up() {
        let sp = ramp(4000.0, 4100.0, 21);
        let hy = ramp(3.0, 3.2, 21);
        let flags = divergence_flags(&sp, &hy, 20);
        assert_eq!(flags.len(), 21);
        assert!(flags[..20].iter().all(|f| !f));
        assert!(flags[20]);
    }

    #[test]
    fn test_divergence_spread_falling() {
        let sp = ramp(4000.0, 4100.0, 21);
        let hy = ramp(3.0, 2.8, 21);
        let flags = divergence_flags(&sp, &hy, 20);
        assert!(!flags[20]);
    }

    fn sample_dataset(n: usize) -> AlignedDataset {
        let mut ds = AlignedDataset::default();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for i in 0..n {
            let t = i as f64;
            ds.push(
                start + chrono::Duration::days(i as i64),
                [
                    5_800_000.0 + 10_000.0 * (t * 0.05).sin() + 500.0 * t,
                    120.0 + (t * 0.11).cos(),
                    3.5 + 0.4 * (t * 0.07).sin(),
                    40_000.0 + 200.0 * t + 1_500.0 * (t * 0.13).sin(),
                    15_000.0 + 20.0 * t + 300.0 * (t * 0.09).cos(),
                    4_800.0 + 3.0 * t + 60.0 * (t * 0.17).sin(),
                ],
            );
        }
        ds
    }

    #[test]
    fn test_compute_shapes() {
        let ds = sample_dataset(150);
        let cfg = AppConfig::default();
        let stats = Statistics::compute(&ds, &cfg);

        assert_eq!(stats.z_net_liquidity.len(), 150);
        assert_eq!(stats.correlation_dates.len(), 149);
        assert_eq!(stats.correlation_dates[0], ds.dates[1]);
        assert_eq!(stats.corr_dollar_btc.len(), 149);
        assert!(stats.corr_dollar_btc[..89].iter().all(|c| c.is_none()));
        assert!(stats.corr_dollar_btc[89..].iter().all(|c| c.is_some()));
        assert!(stats.liquidity_change[..60].iter().all(|c| c.is_none()));
        assert!(stats.liquidity_change[60].is_some());
        assert_eq!(stats.correlation_matrix.len(), 6);
        for (i, row) in stats.correlation_matrix.iter().enumerate() {
            assert!((row[i].unwrap() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_compute_is_deterministic() {
        let ds = sample_dataset(120);
        let cfg = AppConfig::default();
        assert_eq!(Statistics::compute(&ds, &cfg), Statistics::compute(&ds, &cfg));
    }

    #[test]
    fn test_snapshot_and_recent_divergence() {
        let ds = sample_dataset(100);
        let mut stats = Statistics::compute(&ds, &AppConfig::default());
        stats.divergence = vec![false; 100];
        stats.divergence[96] = true;
        stats.divergence[99] = true;
        stats.divergence[10] = true;

        let snap = LatestSnapshot::from_analysis(&ds, &stats, 5).unwrap();
        assert_eq!(snap.recent_divergence, 2);
        assert_eq!(snap.end, *ds.dates.last().unwrap());
        assert_eq!(snap.sp500, *ds.sp500.last().unwrap());

        assert!(LatestSnapshot::from_analysis(&AlignedDataset::default(), &stats, 5).is_none());
    }
}
