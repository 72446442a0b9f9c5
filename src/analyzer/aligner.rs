use crate::model::{AlignedDataset, TimeSeries};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Inner-joins net liquidity with the five raw series and keeps the trailing window.
///
/// A date survives only if all six inputs have a non-missing value on it and
/// it is no older than `today - lookback_days`.
pub fn align(
    liquidity: &BTreeMap<NaiveDate, f64>,
    dollar_index: &TimeSeries,
    hy_spread: &TimeSeries,
    btc: &TimeSeries,
    nasdaq: &TimeSeries,
    sp500: &TimeSeries,
    today: NaiveDate,
    lookback_days: i64,
) -> AlignedDataset {
    let start = today - Duration::days(lookback_days);
    let mut dataset = AlignedDataset::default();

    for (&date, &liq) in liquidity.range(start..) {
        let row = (
            dollar_index.get(&date),
            hy_spread.get(&date),
            btc.get(&date),
            nasdaq.get(&date),
            sp500.get(&date),
        );
        if let (Some(dxy), Some(hy), Some(b), Some(n), Some(sp)) = row {
            if liq.is_finite() {
                dataset.push(date, [liq, dxy, hy, b, n, sp]);
            }
        }
    }

    dataset
}
