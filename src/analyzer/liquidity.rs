use crate::model::TimeSeries;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Reverse repo is published in billions, the other two inputs in millions.
pub const REVERSE_REPO_UNIT_SCALE: f64 = 1000.0;

/// Net liquidity in millions of USD: `assets - treasury - reverse_repo`.
///
/// The three inputs are outer-joined on date and forward-filled, because
/// they are published at different frequencies. Rows still missing a value
/// (before every input has started) are dropped.
pub fn net_liquidity(
    assets: &TimeSeries,
    treasury: &TimeSeries,
    reverse_repo: &TimeSeries,
) -> BTreeMap<NaiveDate, f64> {
    let dates: BTreeSet<NaiveDate> = assets
        .observations
        .keys()
        .chain(treasury.observations.keys())
        .chain(reverse_repo.observations.keys())
        .copied()
        .collect();

    let mut last_assets: Option<f64> = None;
    let mut last_treasury: Option<f64> = None;
    let mut last_repo: Option<f64> = None;
    let mut result = BTreeMap::new();

    for date in dates {
        if let Some(v) = assets.get(&date) {
            last_assets = Some(v);
        }
        if let Some(v) = treasury.get(&date) {
            last_treasury = Some(v);
        }
        if let Some(v) = reverse_repo.get(&date) {
            last_repo = Some(v * REVERSE_REPO_UNIT_SCALE);
        }

        if let (Some(a), Some(t), Some(r)) = (last_assets, last_treasury, last_repo) {
            result.insert(date, a - t - r);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeriesId;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn series(id: SeriesId, points: &[(u32, Option<f64>)]) -> TimeSeries {
        TimeSeries::from_points(id, points.iter().map(|&(d, v)| (day(d), v)))
    }

    #[test]
    fn test_same_dates_formula() {
        let walcl = series(SeriesId::FedAssets, &[(1, Some(7_500_000.0))]);
        let tga = series(SeriesId::TreasuryAccount, &[(1, Some(750_000.0))]);
        let rrp = series(SeriesId::ReverseRepo, &[(1, Some(450.5))]);

        let liq = net_liquidity(&walcl, &tga, &rrp);
        assert_eq!(liq.len(), 1);
        assert_eq!(liq[&day(1)], 7_500_000.0 - 750_000.0 - 450_500.0);
    }

    #[test]
    fn test_forward_fill_across_frequencies() {
        // Weekly balance sheet, daily repo.
        let walcl = series(SeriesId::FedAssets, &[(1, Some(1000.0)), (8, Some(1100.0))]);
        let tga = series(SeriesId::TreasuryAccount, &[(1, Some(100.0)), (8, Some(90.0))]);
        let rrp = series(
            SeriesId::ReverseRepo,
            &[(1, Some(0.2)), (2, Some(0.3)), (3, None), (8, Some(0.1))],
        );

        let liq = net_liquidity(&walcl, &tga, &rrp);
        assert_eq!(liq.keys().copied().collect::<Vec<_>>(), vec![day(1), day(2), day(3), day(8)]);
        assert_eq!(liq[&day(1)], 1000.0 - 100.0 - 200.0);
        assert_eq!(liq[&day(2)], 1000.0 - 100.0 - 300.0);
        // Gap on day 3 carries the day-2 repo value forward.
        assert_eq!(liq[&day(3)], 1000.0 - 100.0 - 300.0);
        assert_eq!(liq[&day(8)], 1100.0 - 90.0 - 100.0);
    }

    #[test]
    fn test_leading_partial_rows_dropped() {
        let walcl = series(
            SeriesId::FedAssets,
            &[(1, Some(1000.0)), (2, Some(1000.0)), (3, Some(1000.0))],
        );
        let tga = series(SeriesId::TreasuryAccount, &[(2, Some(10.0))]);
        let rrp = series(SeriesId::ReverseRepo, &[(3, Some(0.0))]);

        let liq = net_liquidity(&walcl, &tga, &rrp);
        assert_eq!(liq.len(), 1);
        assert_eq!(liq[&day(3)], 990.0);
    }

    #[test]
    fn test_unit_scale_exact() {
        let rrp_bn = 2553.123;
        let walcl = series(SeriesId::FedAssets, &[(1, Some(0.0))]);
        let tga = series(SeriesId::TreasuryAccount, &[(1, Some(0.0))]);
        let rrp = series(SeriesId::ReverseRepo, &[(1, Some(rrp_bn))]);

        let liq = net_liquidity(&walcl, &tga, &rrp);
        assert_eq!(liq[&day(1)], -(rrp_bn * 1000.0));
    }
}
