// Chart builders and HTML output.

pub mod combo;
pub mod dashboard;
pub mod figure;

use crate::analyzer::{LatestSnapshot, Statistics};
use crate::config::AppConfig;
use crate::model::{AlignedDataset, ChartError};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const LIQUIDITY_FILE: &str = "combo1_net_liquidity.html";
pub const DOLLAR_FILE: &str = "combo2_dollar_btc.html";
pub const CREDIT_FILE: &str = "combo3_hy_spread.html";
pub const DASHBOARD_FILE: &str = "dashboard_comprehensive.html";

/// Builds the four figures and writes them into the configured output directory.
/// Returns the written paths in a fixed order.
pub fn write_all(
    data: &AlignedDataset,
    stats: &Statistics,
    snapshot: &LatestSnapshot,
    config: &AppConfig,
) -> Result<Vec<PathBuf>, ChartError> {
    fs::create_dir_all(&config.output_dir)?;

    let figures = [
        (
            LIQUIDITY_FILE,
            "Net Liquidity",
            combo::liquidity_combo(data, stats, config.liquidity_trend_periods),
        ),
        (DOLLAR_FILE, "Dollar Index vs Bitcoin", combo::dollar_combo(data, stats)),
        (
            CREDIT_FILE,
            "High Yield Spread",
            combo::credit_combo(data, stats, &config.thresholds),
        ),
        (
            DASHBOARD_FILE,
            "Quant 3-Combo Dashboard",
            dashboard::dashboard(data, stats, snapshot, &config.thresholds),
        ),
    ];

    let mut written = Vec::with_capacity(figures.len());
    for (file, page_title, figure) in figures {
        let path = config.output_dir.join(file);
        figure.write_html(&path, page_title)?;
        info!("📈 Chart written: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_write_all_creates_four_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            output_dir: dir.path().join("charts"),
            ..AppConfig::default()
        };

        let mut ds = AlignedDataset::default();
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        for i in 0..30 {
            let t = i as f64;
            ds.push(
                start + chrono::Duration::days(i),
                [5.9e6 - 50.0 * t, 119.0 + 0.05 * t, 3.4, 61e3 + 10.0 * t, 17.5e3, 5.3e3 + t],
            );
        }
        let stats = Statistics::compute(&ds, &config);
        let snap = LatestSnapshot::from_analysis(&ds, &stats, 5).unwrap();

        let paths = write_all(&ds, &stats, &snap, &config).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![LIQUIDITY_FILE, DOLLAR_FILE, CREDIT_FILE, DASHBOARD_FILE]);
        for path in &paths {
            let html = fs::read_to_string(path).unwrap();
            assert!(html.contains("Plotly.newPlot"));
        }
    }
}
