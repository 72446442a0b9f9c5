mod analyzer;
mod chart;
mod config;
mod fetcher;
mod model;
mod normalizer;
mod parser;
mod pipeline;
mod report;
mod signals;
mod utils;

use config::{API_KEY_ENV, CONFIG_PATH, load_config};
use fetcher::FredClient;
use model::AppError;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    if let Err(e) = run().await {
        error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = load_config(CONFIG_PATH)?;
    let api_key = config.api_key(std::env::var(API_KEY_ENV).ok())?;

    info!("🚀 Starting Quant 3-combo analysis...");
    let client = FredClient::new(
        &config.fred_base_url,
        api_key,
        Duration::from_secs(config.request_timeout_seconds),
    )?;

    let raw = pipeline::fetch_all(&client).await?;
    let today = chrono::Local::now().date_naive();
    let analysis = pipeline::analyze(&raw, today, &config)?;

    info!("🎨 Building charts...");
    let files = chart::write_all(
        &analysis.dataset,
        &analysis.statistics,
        &analysis.snapshot,
        &config,
    )?;

    report::print_summary(
        &analysis.snapshot,
        &config.thresholds,
        config.correlation_window,
        config.liquidity_trend_periods,
        &files,
    );

    let signals = signals::evaluate(
        &analysis.snapshot,
        &config.thresholds,
        config.divergence_lookback_rows,
    );
    signals::print_signals(&signals);
    Ok(())
}
