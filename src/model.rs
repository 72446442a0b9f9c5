// Core structs: SeriesId, TimeSeries, AlignedDataset and error types
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// FRED series used by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesId {
    FedAssets,
    TreasuryAccount,
    ReverseRepo,
    DollarIndex,
    HySpread,
    Bitcoin,
    Nasdaq,
    Sp500,
}

impl SeriesId {
    /// Fetch order.
    pub const ALL: [SeriesId; 8] = [
        SeriesId::FedAssets,
        SeriesId::TreasuryAccount,
        SeriesId::ReverseRepo,
        SeriesId::DollarIndex,
        SeriesId::HySpread,
        SeriesId::Bitcoin,
        SeriesId::Nasdaq,
        SeriesId::Sp500,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SeriesId::FedAssets => "WALCL",
            SeriesId::TreasuryAccount => "WTREGEN",
            SeriesId::ReverseRepo => "RRPONTSYD",
            SeriesId::DollarIndex => "DTWEXAFEGS",
            SeriesId::HySpread => "BAMLH0A0HYM2",
            SeriesId::Bitcoin => "CBBTCUSD",
            SeriesId::Nasdaq => "NASDAQCOM",
            SeriesId::Sp500 => "SP500",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeriesId::FedAssets => "Fed Total Assets (Mn USD)",
            SeriesId::TreasuryAccount => "Treasury General Account (Mn USD)",
            SeriesId::ReverseRepo => "Overnight Reverse Repo (Bn USD)",
            SeriesId::DollarIndex => "Dollar Index (AFE)",
            SeriesId::HySpread => "ICE BofA US High Yield Spread (%)",
            SeriesId::Bitcoin => "Bitcoin (Coinbase, USD)",
            SeriesId::Nasdaq => "NASDAQ Composite",
            SeriesId::Sp500 => "S&P 500",
        }
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Date-indexed observations of one series. `None` marks a published gap.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub id: SeriesId,
    pub observations: BTreeMap<NaiveDate, Option<f64>>,
}

impl TimeSeries {
    pub fn from_points(
        id: SeriesId,
        points: impl IntoIterator<Item = (NaiveDate, Option<f64>)>,
    ) -> Self {
        Self {
            id,
            observations: points.into_iter().collect(),
        }
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.observations.get(date).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Column of the aligned analysis table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    NetLiquidity,
    DollarIndex,
    HySpread,
    Btc,
    Nasdaq,
    Sp500,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::NetLiquidity,
        Column::DollarIndex,
        Column::HySpread,
        Column::Btc,
        Column::Nasdaq,
        Column::Sp500,
    ];

    /// Short label used in charts and the correlation matrix.
    pub fn label(&self) -> &'static str {
        match self {
            Column::NetLiquidity => "NetLiq",
            Column::DollarIndex => "DXY",
            Column::HySpread => "HYSpread",
            Column::Btc => "BTC",
            Column::Nasdaq => "NASDAQ",
            Column::Sp500 => "SP500",
        }
    }
}

/// Inner-joined, gap-free table of the six analysis columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedDataset {
    pub dates: Vec<NaiveDate>,
    pub net_liquidity: Vec<f64>,
    pub dollar_index: Vec<f64>,
    pub hy_spread: Vec<f64>,
    pub btc: Vec<f64>,
    pub nasdaq: Vec<f64>,
    pub sp500: Vec<f64>,
}

impl AlignedDataset {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, column: Column) -> &[f64] {
        match column {
            Column::NetLiquidity => &self.net_liquidity,
            Column::DollarIndex => &self.dollar_index,
            Column::HySpread => &self.hy_spread,
            Column::Btc => &self.btc,
            Column::Nasdaq => &self.nasdaq,
            Column::Sp500 => &self.sp500,
        }
    }

    pub fn push(&mut self, date: NaiveDate, row: [f64; 6]) {
        self.dates.push(date);
        self.net_liquidity.push(row[0]);
        self.dollar_index.push(row[1]);
        self.hy_spread.push(row[2]);
        self.btc.push(row[3]);
        self.nasdaq.push(row[4]);
        self.sp500.push(row[5]);
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request for {series} failed: {source}")]
    Http {
        series: SeriesId,
        #[source]
        source: reqwest::Error,
    },
    #[error("FRED API rejected {series} [{status}]: {message}")]
    Api {
        series: SeriesId,
        status: u16,
        message: String,
    },
    #[error("Malformed response for {series}: {source}")]
    Decode {
        series: SeriesId,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid date '{value}' in {series}")]
    InvalidDate { series: SeriesId, value: String },
    #[error("Invalid value '{value}' for {series} on {date}")]
    InvalidValue {
        series: SeriesId,
        date: NaiveDate,
        value: String,
    },
    #[error("Series {0} was not fetched")]
    MissingSeries(SeriesId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No FRED API key: set FRED_API_KEY or fred_api_key in config.json")]
    MissingApiKey,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize chart: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("No rows left after alignment")]
    EmptyDataset,
}
