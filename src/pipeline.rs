// Fetch and analysis stages of the run
use crate::analyzer::{LatestSnapshot, Statistics, align, net_liquidity};
use crate::config::AppConfig;
use crate::fetcher::SeriesFetcher;
use crate::model::{AlignedDataset, AppError, FetchError, SeriesId, TimeSeries};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{info, warn};

/// The eight fetched series, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    series: HashMap<SeriesId, TimeSeries>,
}

impl RawSeries {
    pub fn insert(&mut self, ts: TimeSeries) {
        self.series.insert(ts.id, ts);
    }

    pub fn get(&self, id: SeriesId) -> Result<&TimeSeries, FetchError> {
        self.series.get(&id).ok_or(FetchError::MissingSeries(id))
    }
}

/// Everything the chart and print stages consume.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub dataset: AlignedDataset,
    pub statistics: Statistics,
    pub snapshot: LatestSnapshot,
}

fn progress_message(id: SeriesId) -> Option<&'static str> {
    match id {
        SeriesId::FedAssets => Some("📥 Downloading Net Liquidity components..."),
        SeriesId::DollarIndex => Some("📥 Downloading Dollar Index..."),
        SeriesId::HySpread => Some("📥 Downloading High Yield Spread..."),
        SeriesId::Bitcoin => Some("📥 Downloading asset prices..."),
        _ => None,
    }
}

/// Fetches every series one after another; the first failure aborts.
pub async fn fetch_all<F: SeriesFetcher + ?Sized>(fetcher: &F) -> Result<RawSeries, FetchError> {
    let mut raw = RawSeries::default();
    for id in SeriesId::ALL {
        if let Some(msg) = progress_message(id) {
            info!("{}", msg);
        }
        let ts = fetcher.fetch(id).await?;
        if ts.is_empty() {
            warn!("{} ({}) returned no observations", id, id.label());
        } else {
            info!("{} ({}): {} observations", id, id.label(), ts.len());
        }
        raw.insert(ts);
    }
    info!("✅ All data downloaded!");
    Ok(raw)
}

/// Derives net liquidity, aligns the table and computes all statistics.
pub fn analyze(
    raw: &RawSeries,
    today: NaiveDate,
    config: &AppConfig,
) -> Result<Analysis, AppError> {
    let liquidity = net_liquidity(
        raw.get(SeriesId::FedAssets)?,
        raw.get(SeriesId::TreasuryAccount)?,
        raw.get(SeriesId::ReverseRepo)?,
    );
    info!("📊 Net Liquidity computed: {} data points", liquidity.len());

    let dataset = align(
        &liquidity,
        raw.get(SeriesId::DollarIndex)?,
        raw.get(SeriesId::HySpread)?,
        raw.get(SeriesId::Bitcoin)?,
        raw.get(SeriesId::Nasdaq)?,
        raw.get(SeriesId::Sp500)?,
        today,
        config.lookback_days,
    );
    if dataset.is_empty() {
        return Err(AppError::EmptyDataset);
    }
    if let (Some(first), Some(last)) = (dataset.first_date(), dataset.last_date()) {
        info!("📅 Analysis period: {} ~ {}", first, last);
    }
    info!("📈 Data points: {}", dataset.len());

    let statistics = Statistics::compute(&dataset, config);
    let snapshot =
        LatestSnapshot::from_analysis(&dataset, &statistics, config.divergence_lookback_rows)
            .ok_or(AppError::EmptyDataset)?;

    Ok(Analysis {
        dataset,
        statistics,
        snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// Serves canned series; unknown ids fail like an invalid FRED code.
    struct FixtureFetcher {
        series: HashMap<SeriesId, TimeSeries>,
    }

    #[async_trait::async_trait]
    impl SeriesFetcher for FixtureFetcher {
        async fn fetch(&self, series: SeriesId) -> Result<TimeSeries, FetchError> {
            self.series.get(&series).cloned().ok_or(FetchError::Api {
                series,
                status: 400,
                message: "Bad Request. The series does not exist.".into(),
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    /// 400 business-ish days ending today; weekly balance sheet, daily markets.
    fn fixture() -> FixtureFetcher {
        let end = today();
        let days: Vec<NaiveDate> = (0..400).rev().map(|i| end - Duration::days(i)).collect();
        let mut series = HashMap::new();

        let weekly = |id: SeriesId, base: f64, step: f64| {
            TimeSeries::from_points(
                id,
                days.iter()
                    .enumerate()
                    .filter(|(i, _)| i % 7 == 0)
                    .map(|(i, d)| (*d, Some(base + step * i as f64))),
            )
        };
        let daily = |id: SeriesId, f: &dyn Fn(f64) -> f64| {
            TimeSeries::from_points(
                id,
                days.iter()
                    .enumerate()
                    .map(|(i, d)| (*d, Some(f(i as f64)))),
            )
        };

        for ts in [
            weekly(SeriesId::FedAssets, 7_000_000.0, -500.0),
            weekly(SeriesId::TreasuryAccount, 750_000.0, 120.0),
            daily(SeriesId::ReverseRepo, &|t| 400.0 + 50.0 * (t * 0.05).sin()),
            daily(SeriesId::DollarIndex, &|t| 120.0 + 2.0 * (t * 0.03).cos()),
            daily(SeriesId::HySpread, &|t| 3.2 + 0.5 * (t * 0.04).sin()),
            daily(SeriesId::Bitcoin, &|t| 50_000.0 + 40.0 * t + 2_000.0 * (t * 0.09).sin()),
            daily(SeriesId::Nasdaq, &|t| 16_000.0 + 5.0 * t + 300.0 * (t * 0.07).cos()),
            daily(SeriesId::Sp500, &|t| 5_000.0 + 1.5 * t + 80.0 * (t * 0.11).sin()),
        ] {
            series.insert(ts.id, ts);
        }
        FixtureFetcher { series }
    }

    #[tokio::test]
    async fn test_fetch_all_collects_eight_series() {
        let fetcher = fixture();
        let raw = fetch_all(&fetcher).await.unwrap();
        for id in SeriesId::ALL {
            assert!(raw.get(id).is_ok());
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts() {
        let mut fetcher = fixture();
        fetcher.series.remove(&SeriesId::HySpread);
        let err = fetch_all(&fetcher).await.unwrap_err();
        assert!(matches!(err, FetchError::Api { series: SeriesId::HySpread, .. }));
    }

    #[tokio::test]
    async fn test_empty_series_does_not_abort() {
        let mut fetcher = fixture();
        let empty: Vec<(NaiveDate, Option<f64>)> = Vec::new();
        fetcher
            .series
            .insert(SeriesId::Nasdaq, TimeSeries::from_points(SeriesId::Nasdaq, empty));
        let raw = fetch_all(&fetcher).await.unwrap();
        assert!(raw.get(SeriesId::Nasdaq).unwrap().is_empty());
        assert!(!raw.get(SeriesId::Sp500).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_end_to_end() {
        let raw = fetch_all(&fixture()).await.unwrap();
        let config = AppConfig {
            lookback_days: 300,
            ..AppConfig::default()
        };
        let analysis = analyze(&raw, today(), &config).unwrap();
        let ds = &analysis.dataset;

        // Weekly series are forward-filled, so every daily row survives.
        assert_eq!(ds.len(), 301);
        assert_eq!(ds.last_date(), Some(today()));
        assert!(ds.first_date().unwrap() >= today() - Duration::days(300));
        assert!(ds.dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(analysis.statistics.correlation_dates.len(), 300);
        assert!(analysis.snapshot.corr_dollar_btc.is_some());
        assert!(analysis.snapshot.liquidity_change.is_some());
    }

    #[tokio::test]
    async fn test_analyze_is_idempotent() {
        let raw = fetch_all(&fixture()).await.unwrap();
        let config = AppConfig::default();
        let first = analyze(&raw, today(), &config).unwrap();
        let second = analyze(&raw, today(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_empty_window() {
        let mut raw = RawSeries::default();
        for id in SeriesId::ALL {
            raw.insert(TimeSeries::from_points(
                id,
                [(NaiveDate::from_ymd_opt(2010, 1, 4).unwrap(), Some(1.0))],
            ));
        }
        let err = analyze(&raw, today(), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::EmptyDataset));
    }

    #[test]
    fn test_analyze_missing_series() {
        let raw = RawSeries::default();
        let err = analyze(&raw, today(), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Fetch(FetchError::MissingSeries(SeriesId::FedAssets))));
    }
}
