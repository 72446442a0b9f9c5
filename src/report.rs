// Console summary of the latest snapshot
use crate::analyzer::LatestSnapshot;
use crate::config::SignalThresholds;
use crate::utils::{format_signed, format_trillions};
use std::path::PathBuf;

/// Renders the summary block printed after the charts are written.
pub fn render_summary(
    snapshot: &LatestSnapshot,
    thresholds: &SignalThresholds,
    window: usize,
    trend_periods: usize,
    files: &[PathBuf],
) -> String {
    let rule = "=".repeat(70);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n📊 Quant 3-combo analysis complete!\n{}\n", rule, rule));
    out.push_str(&format!("\n📅 Period: {} ~ {}\n", snapshot.start, snapshot.end));

    out.push_str(&format!(
        "\n💰 Net Liquidity: {} (trillion)\n",
        format_trillions(snapshot.net_liquidity)
    ));
    out.push_str(&format!(
        "   └ {}-day change: {}%\n",
        trend_periods,
        format_signed(snapshot.liquidity_change, 2)
    ));
    let regime = match snapshot.liquidity_change {
        Some(c) if c > 0.0 => "Expansion (risk-on) 🟢",
        Some(_) => "Contraction (risk-off) 🔴",
        None => "n/a",
    };
    out.push_str(&format!("   └ Signal: {}\n", regime));

    out.push_str(&format!("\n💵 Dollar Index: {:.2}\n", snapshot.dollar_index));
    let zone = if snapshot.hy_spread > thresholds.spread_crisis {
        "(danger zone 🔴)"
    } else {
        "(normal zone 🟢)"
    };
    out.push_str(&format!("\n⚠️ HY Spread: {:.2}% {}\n", snapshot.hy_spread, zone));

    out.push_str(&format!("\n🔗 Latest {}-day correlations:\n", window));
    out.push_str(&format!(
        "   • Net Liq ↔ BTC: {}\n",
        format_signed(snapshot.corr_liquidity_btc, 3)
    ));
    out.push_str(&format!(
        "   • Net Liq ↔ NASDAQ: {}\n",
        format_signed(snapshot.corr_liquidity_nasdaq, 3)
    ));
    out.push_str(&format!(
        "   • DXY ↔ BTC: {} (inverse strength)\n",
        format_signed(snapshot.corr_dollar_btc, 3)
    ));
    out.push_str(&format!(
        "   • HY Spread ↔ SP500: {}\n",
        format_signed(snapshot.corr_spread_sp500, 3)
    ));

    out.push_str(&format!("\n✅ {} interactive HTML charts written:\n", files.len()));
    for (i, file) in files.iter().enumerate() {
        out.push_str(&format!("   {}. {}\n", i + 1, file.display()));
    }
    out.push_str("\n💡 Open the files in a browser for zoom/pan/hover.\n");
    out.push_str(&rule);
    out
}

pub fn print_summary(
    snapshot: &LatestSnapshot,
    thresholds: &SignalThresholds,
    window: usize,
    trend_periods: usize,
    files: &[PathBuf],
) {
    println!("{}", render_summary(snapshot, thresholds, window, trend_periods, files));
}
