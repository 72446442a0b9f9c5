use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "config.json";
pub const API_KEY_ENV: &str = "FRED_API_KEY";

pub const DEFAULT_FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 3 * 365;
pub const DEFAULT_CORRELATION_WINDOW: usize = 90;
pub const DEFAULT_LIQUIDITY_TREND_PERIODS: usize = 60;
pub const DEFAULT_DIVERGENCE_PERIODS: usize = 20;
pub const DEFAULT_DIVERGENCE_LOOKBACK_ROWS: usize = 5;

pub const DEFAULT_LIQUIDITY_TREND_PCT: f64 = 2.0;
pub const DEFAULT_DOLLAR_BTC_INVERSE_CORR: f64 = -0.5;
pub const DEFAULT_SPREAD_CRISIS: f64 = 5.0;
pub const DEFAULT_SPREAD_CAUTION: f64 = 4.0;

/// Fixed heuristic levels the signal printer and charts compare against.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// Absolute 60-period liquidity change (%) that counts as a strong trend.
    pub liquidity_trend_pct: f64,
    pub dollar_btc_inverse_corr: f64,
    pub spread_crisis: f64,
    pub spread_caution: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            liquidity_trend_pct: DEFAULT_LIQUIDITY_TREND_PCT,
            dollar_btc_inverse_corr: DEFAULT_DOLLAR_BTC_INVERSE_CORR,
            spread_crisis: DEFAULT_SPREAD_CRISIS,
            spread_caution: DEFAULT_SPREAD_CAUTION,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fred_api_key: Option<String>,
    pub fred_base_url: String,
    pub request_timeout_seconds: u64,
    pub output_dir: PathBuf,
    pub lookback_days: i64,
    pub correlation_window: usize,
    pub liquidity_trend_periods: usize,
    pub divergence_periods: usize,
    pub divergence_lookback_rows: usize,
    pub thresholds: SignalThresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fred_api_key: None,
            fred_base_url: DEFAULT_FRED_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            output_dir: PathBuf::from("."),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            correlation_window: DEFAULT_CORRELATION_WINDOW,
            liquidity_trend_periods: DEFAULT_LIQUIDITY_TREND_PERIODS,
            divergence_periods: DEFAULT_DIVERGENCE_PERIODS,
            divergence_lookback_rows: DEFAULT_DIVERGENCE_LOOKBACK_ROWS,
            thresholds: SignalThresholds::default(),
        }
    }
}

impl AppConfig {
    /// Picks the API key, preferring the environment over the config file.
    pub fn api_key(&self, from_env: Option<String>) -> Result<String, ConfigError> {
        from_env
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.fred_api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey)
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let cfg = load_config("definitely-not-here.json").unwrap();
        assert_eq!(cfg.correlation_window, 90);
        assert_eq!(cfg.lookback_days, 1095);
        assert_eq!(cfg.thresholds.spread_crisis, 5.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"correlation_window": 30, "thresholds": {{"spread_caution": 3.5}}}}"#
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.correlation_window, 30);
        assert_eq!(cfg.thresholds.spread_caution, 3.5);
        assert_eq!(cfg.thresholds.spread_crisis, 5.0);
        assert_eq!(cfg.fred_base_url, DEFAULT_FRED_BASE_URL);
    }

    #[test]
    fn test_api_key_prefers_env() {
        let cfg = AppConfig {
            fred_api_key: Some("from-file".into()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.api_key(Some("from-env".into())).unwrap(), "from-env");
        assert_eq!(cfg.api_key(None).unwrap(), "from-file");
        assert_eq!(cfg.api_key(Some("  ".into())).unwrap(), "from-file");
    }

    #[test]
    fn test_api_key_missing() {
        let cfg = AppConfig::default();
        assert!(matches!(cfg.api_key(None), Err(ConfigError::MissingApiKey)));
    }
}
