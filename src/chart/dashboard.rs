use crate::analyzer::{LatestSnapshot, Statistics};
use crate::chart::combo::{BLUE, CRIMSON, GREEN, ORANGE, RED};
use crate::chart::figure::{CellSpec, Figure, HLine, Heatmap, Line, Scatter, SubplotGrid, Table};
use crate::config::SignalThresholds;
use crate::model::{AlignedDataset, Column};
use crate::utils::{format_thousands, format_trillions};

/// Rows of the "latest indicators" table: metric, value, signal.
pub fn summary_rows(snapshot: &LatestSnapshot, thresholds: &SignalThresholds) -> Vec<Vec<String>> {
    let corr = |c: Option<f64>| c.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "n/a".into());

    let liquidity_signal = match snapshot.liquidity_change {
        Some(change) if change > 0.0 => format!("🟢 Expansion ({:+.1}%)", change),
        Some(change) => format!("🔴 Contraction ({:+.1}%)", change),
        None => "n/a".to_string(),
    };
    let spread_signal = if snapshot.hy_spread > thresholds.spread_crisis {
        "⚠️ Danger"
    } else {
        "✅ Normal"
    };

    vec![
        vec![
            "Net Liquidity".into(),
            format_trillions(snapshot.net_liquidity),
            liquidity_signal,
        ],
        vec![
            "Dollar Index".into(),
            format!("{:.2}", snapshot.dollar_index),
            String::new(),
        ],
        vec![
            "HY Spread".into(),
            format!("{:.2}%", snapshot.hy_spread),
            spread_signal.into(),
        ],
        vec![
            "Bitcoin".into(),
            format!("${}", format_thousands(snapshot.btc, 0)),
            String::new(),
        ],
        vec![
            "NASDAQ".into(),
            format_thousands(snapshot.nasdaq, 0),
            String::new(),
        ],
        vec![
            "S&P 500".into(),
            format!("{:.2}", snapshot.sp500),
            String::new(),
        ],
        vec![
            "NetLiq ↔ BTC corr".into(),
            corr(snapshot.corr_liquidity_btc),
            String::new(),
        ],
        vec![
            "DXY ↔ BTC corr".into(),
            corr(snapshot.corr_dollar_btc),
            "Inverse".into(),
        ],
        vec![
            "HY ↔ SP500 corr".into(),
            corr(snapshot.corr_spread_sp500),
            String::new(),
        ],
    ]
}

/// Combined dashboard: z-scores, dollar vs BTC, correlation heatmap, summary table, HY spread.
pub fn dashboard(
    data: &AlignedDataset,
    stats: &Statistics,
    snapshot: &LatestSnapshot,
    thresholds: &SignalThresholds,
) -> Figure {
    let grid = SubplotGrid::new(3, 2)
        .row_heights(&[0.3, 0.35, 0.35])
        .vertical_spacing(0.1)
        .horizontal_spacing(0.15)
        .spec(1, 1, Some(CellSpec::xy().colspan(2)))
        .spec(1, 2, None)
        .spec(3, 1, Some(CellSpec::domain()));
    let titles = [
        "Net Liquidity + BTC/NASDAQ (Z-score)",
        "Dollar Index (inverted) vs BTC",
        "Correlation heatmap",
        "Latest indicators",
        "High Yield Spread",
    ];
    let mut fig = Figure::new(&grid, &titles);

    let dates = &data.dates;
    fig.add_trace(
        Scatter::new(dates.clone(), stats.z_net_liquidity.clone())
            .name("Net Liquidity")
            .line(Line::new(BLUE, 2.5)),
        1,
        1,
    )
    .add_trace(
        Scatter::new(dates.clone(), stats.z_btc.clone())
            .name("Bitcoin")
            .line(Line::new(ORANGE, 2.5)),
        1,
        1,
    )
    .add_trace(
        Scatter::new(dates.clone(), stats.z_nasdaq.clone())
            .name("NASDAQ")
            .line(Line::new(GREEN, 2.5)),
        1,
        1,
    )
    .add_hline(HLine::zero(), 1, 1, false);

    fig.add_trace(
        Scatter::new(dates.clone(), stats.z_dollar_inverted.clone())
            .name("DXY (inverted)")
            .line(Line::new(RED, 2.0)),
        2,
        1,
    )
    .add_trace(
        Scatter::new(dates.clone(), stats.z_btc.clone())
            .name("BTC")
            .line(Line::new(ORANGE, 2.0)),
        2,
        1,
    )
    .add_hline(HLine::zero(), 2, 1, false);

    let labels: Vec<&str> = Column::ALL.iter().map(|c| c.label()).collect();
    let mut heatmap = Heatmap::correlation(&labels, stats.correlation_matrix.clone());
    if let Some(cell) = fig.subplot(2, 2) {
        heatmap = heatmap.colorbar_at(cell.x_domain[1] + 0.02, cell.y_domain);
    }
    fig.add_trace(heatmap, 2, 2);

    let rows = summary_rows(snapshot, thresholds);
    fig.add_trace(Table::from_rows(&["Metric", "Value", "Signal"], &rows), 3, 1);

    fig.add_trace(
        Scatter::from_values(dates, &data.hy_spread)
            .name("HY Spread")
            .line(Line::new(CRIMSON, 2.0)),
        3,
        2,
    )
    .add_hline(HLine::threshold(thresholds.spread_crisis, "red", 2.0), 3, 2, false);

    let title = format!(
        "<b>Quant 3-Combo Dashboard</b><br><sub>Period: {} ~ {}</sub>",
        snapshot.start, snapshot.end
    );
    fig.update_layout(&title, 22, 1400);
    fig
}
