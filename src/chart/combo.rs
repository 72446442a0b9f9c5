// The three "combo" figures: liquidity, dollar and credit spread.
use crate::analyzer::Statistics;
use crate::chart::figure::{CellSpec, Figure, HLine, Line, Marker, Scatter, SubplotGrid};
use crate::config::SignalThresholds;
use crate::model::AlignedDataset;
use chrono::NaiveDate;

pub const BLUE: &str = "#2E86AB";
pub const ORANGE: &str = "#F77F00";
pub const GREEN: &str = "#06A77D";
pub const RED: &str = "#D62828";
pub const PURPLE: &str = "#9D4EDD";
pub const CRIMSON: &str = "#A4133C";

/// Keeps the points whose value satisfies `keep`; undefined points are dropped.
fn filter_points(
    dates: &[NaiveDate],
    values: &[Option<f64>],
    keep: impl Fn(f64) -> bool,
) -> (Vec<NaiveDate>, Vec<Option<f64>>) {
    dates
        .iter()
        .zip(values.iter())
        .filter_map(|(d, v)| v.filter(|x| keep(*x)).map(|x| (*d, Some(x))))
        .unzip()
}

/// Net liquidity against BTC and NASDAQ.
pub fn liquidity_combo(data: &AlignedDataset, stats: &Statistics, trend_periods: usize) -> Figure {
    let window = stats.correlation_window;
    let titles = [
        "Combo 1: Net Liquidity vs BTC/NASDAQ (Z-score)".to_string(),
        format!("Net Liquidity correlation ({}-day rolling)", window),
        format!("Net Liquidity {}-day change (expansion/contraction)", trend_periods),
    ];
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let grid = SubplotGrid::new(3, 1)
        .row_heights(&[0.35, 0.3, 0.35])
        .vertical_spacing(0.08);
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

    let corr_dates = &stats.correlation_dates;
    fig.add_trace(
        Scatter::new(corr_dates.clone(), stats.corr_liquidity_btc.clone())
            .name("Corr(NetLiq, BTC)")
            .line(Line::new(ORANGE, 2.5))
            .fill_to_zero("rgba(247, 127, 0, 0.2)"),
        2,
        1,
    )
    .add_trace(
        Scatter::new(corr_dates.clone(), stats.corr_liquidity_nasdaq.clone())
            .name("Corr(NetLiq, NASDAQ)")
            .line(Line::new(GREEN, 2.5))
            .fill_to_zero("rgba(6, 167, 125, 0.2)"),
        2,
        1,
    )
    .add_hline(HLine::zero(), 2, 1, false);

    let (exp_dates, expansion) = filter_points(dates, &stats.liquidity_change, |v| v > 0.0);
    let (con_dates, contraction) = filter_points(dates, &stats.liquidity_change, |v| v <= 0.0);
    fig.add_trace(
        Scatter::new(exp_dates, expansion)
            .name("Expansion")
            .line(Line::new(GREEN, 0.0))
            .fill_to_zero("rgba(6, 167, 125, 0.4)"),
        3,
        1,
    )
    .add_trace(
        Scatter::new(con_dates, contraction)
            .name("Contraction")
            .line(Line::new(RED, 0.0))
            .fill_to_zero("rgba(214, 40, 40, 0.4)"),
        3,
        1,
    )
    .add_trace(
        Scatter::new(dates.clone(), stats.liquidity_change.clone())
            .name("Change")
            .line(Line::new("black", 2.0))
            .hide_legend(),
        3,
        1,
    )
    .add_hline(HLine::zero(), 3, 1, false);

    fig.update_layout("<b>Quant Combo 1: Net Liquidity</b>", 20, 1200)
        .update_yaxis(1, 1, false, "Z-score", None)
        .update_yaxis(2, 1, false, "Correlation", Some([-1.0, 1.0]))
        .update_yaxis(3, 1, false, "Change (%)", None);
    fig
}

/// Inverted dollar index against BTC.
pub fn dollar_combo(data: &AlignedDataset, stats: &Statistics) -> Figure {
    let titles = [
        "Combo 2: Dollar Index (inverted) vs BTC (Z-score)".to_string(),
        format!("Dollar Index vs BTC correlation ({}-day rolling)", stats.correlation_window),
    ];
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let grid = SubplotGrid::new(2, 1)
        .row_heights(&[0.5, 0.5])
        .vertical_spacing(0.12);
    let mut fig = Figure::new(&grid, &titles);

    fig.add_trace(
        Scatter::new(data.dates.clone(), stats.z_dollar_inverted.clone())
            .name("Dollar Index (inverted)")
            .line(Line::new(RED, 2.5)),
        1,
        1,
    )
    .add_trace(
        Scatter::new(data.dates.clone(), stats.z_btc.clone())
            .name("Bitcoin")
            .line(Line::new(ORANGE, 2.5)),
        1,
        1,
    )
    .add_hline(HLine::zero(), 1, 1, false)
    .add_trace(
        Scatter::new(stats.correlation_dates.clone(), stats.corr_dollar_btc.clone())
            .name("Correlation")
            .line(Line::new(PURPLE, 2.5))
            .fill_to_zero("rgba(157, 78, 221, 0.3)"),
        2,
        1,
    )
    .add_hline(HLine::zero(), 2, 1, false);

    fig.update_layout("<b>Quant Combo 2: Dollar Index vs Bitcoin</b>", 20, 900)
        .update_yaxis(1, 1, false, "Z-score", None)
        .update_yaxis(2, 1, false, "Correlation", Some([-1.0, 1.0]));
    fig
}

/// High-yield spread against the S&P 500, with divergence markers.
pub fn credit_combo(
    data: &AlignedDataset,
    stats: &Statistics,
    thresholds: &SignalThresholds,
) -> Figure {
    let titles = [
        "Combo 3: High Yield Spread vs S&P 500".to_string(),
        format!("HY Spread vs S&P 500 correlation ({}-day rolling)", stats.correlation_window),
        "Divergence: S&P up + HY Spread up (sell signal)".to_string(),
    ];
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let grid = SubplotGrid::new(3, 1)
        .row_heights(&[0.35, 0.3, 0.35])
        .vertical_spacing(0.08)
        .spec(1, 1, Some(CellSpec::xy().secondary_y()));
    let mut fig = Figure::new(&grid, &titles);

    fig.add_trace(
        Scatter::from_values(&data.dates, &data.sp500)
            .name("S&P 500")
            .line(Line::new(BLUE, 2.5)),
        1,
        1,
    )
    .add_trace_secondary(
        Scatter::from_values(&data.dates, &data.hy_spread)
            .name("HY Spread")
            .line(Line::new(RED, 2.5)),
        1,
        1,
    );

    let crisis = thresholds.spread_crisis;
    let spread: Vec<Option<f64>> = data.hy_spread.iter().copied().map(Some).collect();
    let (danger_dates, danger) = filter_points(&data.dates, &spread, |v| v > crisis);
    if !danger_dates.is_empty() {
        fig.add_hline(
            HLine::threshold(crisis, "darkred", 2.5)
                .annotate(&format!("Crisis threshold ({}%)", crisis)),
            1,
            1,
            true,
        )
        .add_trace_secondary(
            Scatter::new(danger_dates, danger)
                .line(Line::new(RED, 0.0))
                .fill_to_next("rgba(214, 40, 40, 0.3)")
                .hide_legend(),
            1,
            1,
        );
    }

    fig.add_trace(
        Scatter::new(stats.correlation_dates.clone(), stats.corr_spread_sp500.clone())
            .name("Correlation")
            .line(Line::new(CRIMSON, 2.5))
            .fill_to_zero("rgba(164, 19, 60, 0.3)"),
        2,
        1,
    )
    .add_hline(HLine::zero(), 2, 1, false);

    let (div_dates, div_values): (Vec<NaiveDate>, Vec<Option<f64>>) = data
        .dates
        .iter()
        .zip(data.sp500.iter())
        .zip(stats.divergence.iter())
        .filter(|(_, flagged)| **flagged)
        .map(|((d, v), _)| (*d, Some(*v)))
        .unzip();
    fig.add_trace(
        Scatter::from_values(&data.dates, &data.sp500)
            .name("S&P 500")
            .line(Line::new(BLUE, 2.0))
            .opacity(0.6),
        3,
        1,
    )
    .add_trace(
        Scatter::new(div_dates, div_values)
            .name("Divergence warning")
            .markers(Marker {
                color: "red".into(),
                size: 10.0,
                symbol: "diamond",
            }),
        3,
        1,
    );

    fig.update_layout("<b>Quant Combo 3: High Yield Spread</b>", 20, 1200)
        .update_yaxis(1, 1, false, "S&P 500", None)
        .update_yaxis(1, 1, true, "HY Spread (%)", None)
        .update_yaxis(2, 1, false, "Correlation", Some([-1.0, 1.0]))
        .update_yaxis(3, 1, false, "S&P 500", None);
    fig
}
