// Heuristic trading signals evaluated on the latest snapshot
use crate::analyzer::LatestSnapshot;
use crate::config::SignalThresholds;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    LiquidityExpansion(f64),
    LiquidityContraction(f64),
    LiquidityNeutral,
    DollarBtcInverse(f64),
    DollarBtcWeak,
    SpreadCrisis(f64),
    SpreadCaution(f64),
    SpreadNormal(f64),
    Divergence { days: usize, lookback: usize },
}

/// One signal per rule; divergence only when it occurred recently.
pub fn evaluate(
    snapshot: &LatestSnapshot,
    thresholds: &SignalThresholds,
    lookback: usize,
) -> Vec<Signal> {
    let mut signals = Vec::with_capacity(4);

    signals.push(match snapshot.liquidity_change {
        Some(c) if c > thresholds.liquidity_trend_pct => Signal::LiquidityExpansion(c),
        Some(c) if c < -thresholds.liquidity_trend_pct => Signal::LiquidityContraction(c),
        _ => Signal::LiquidityNeutral,
    });

    signals.push(match snapshot.corr_dollar_btc {
        Some(c) if c <= thresholds.dollar_btc_inverse_corr => Signal::DollarBtcInverse(c),
        _ => Signal::DollarBtcWeak,
    });

    let spread = snapshot.hy_spread;
    signals.push(if spread > thresholds.spread_crisis {
        Signal::SpreadCrisis(spread)
    } else if spread > thresholds.spread_caution {
        Signal::SpreadCaution(spread)
    } else {
        Signal::SpreadNormal(spread)
    });

    if snapshot.recent_divergence > 0 {
        signals.push(Signal::Divergence {
            days: snapshot.recent_divergence,
            lookback,
        });
    }

    signals
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::LiquidityExpansion(c) => write!(
                f,
                "✅ Signal 1: Net Liquidity strongly expanding ({:+.2}%)\n   → Consider buying BTC/NASDAQ",
                c
            ),
            Signal::LiquidityContraction(c) => write!(
                f,
                "⚠️ Signal 1: Net Liquidity strongly contracting ({:+.2}%)\n   → Reduce risk assets / stay defensive",
                c
            ),
            Signal::LiquidityNeutral => write!(f, "⏸️ Signal 1: Net Liquidity neutral"),
            Signal::DollarBtcInverse(c) => write!(
                f,
                "✅ Signal 2: Strong DXY-BTC inverse correlation ({:+.3})\n   → A falling dollar is a BTC buying opportunity",
                c
            ),
            Signal::DollarBtcWeak => write!(f, "⏸️ Signal 2: DXY-BTC inverse correlation weakening"),
            Signal::SpreadCrisis(s) => write!(
                f,
                "🚨 Signal 3: HY Spread above crisis threshold ({:.2}%)\n   → Equity market at risk! Sell / defensive strategy",
                s
            ),
            Signal::SpreadCaution(s) => write!(
                f,
                "⚠️ Signal 3: HY Spread in caution zone ({:.2}%)\n   → Be careful, consider reducing positions",
                s
            ),
            Signal::SpreadNormal(s) => write!(
                f,
                "✅ Signal 3: HY Spread normal ({:.2}%)\n   → Equity market stable",
                s
            ),
            Signal::Divergence { days, lookback } => write!(
                f,
                "⚠️ Warning: divergence on {} of the last {} days!\n   → S&P up + HY Spread up = sell signal",
                days, lookback
            ),
        }
    }
}

pub fn print_signals(signals: &[Signal]) {
    println!("\n{}", "=".repeat(70));
    println!("🎯 Current trading signals");
    println!("{}", "=".repeat(70));
    for signal in signals {
        println!("\n{}", signal);
    }
    println!("{}", "=".repeat(70));
}
