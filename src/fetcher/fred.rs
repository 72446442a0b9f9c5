use crate::fetcher::SeriesFetcher;
use crate::model::{FetchError, SeriesId, TimeSeries};
use crate::parser::{parse_error_message, parse_observations};

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub struct FredClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FredClient {
    pub fn new(
        base_url: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("macro-combo/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_url(&self) -> String {
        format!("{}/series/observations", self.base_url)
    }
}

/// The request URL carries the API key, so it is stripped from the error.
fn transport_error(series: SeriesId, source: reqwest::Error) -> FetchError {
    FetchError::Http {
        series,
        source: source.without_url(),
    }
}

#[async_trait::async_trait]
impl SeriesFetcher for FredClient {
    async fn fetch(&self, series: SeriesId) -> Result<TimeSeries, FetchError> {
        let url = self.build_url();
        debug!("GET {} series_id={}", url, series.code());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series.code()),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(series, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(series, e))?;

        if !status.is_success() {
            let message = parse_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            return Err(FetchError::Api {
                series,
                status: status.as_u16(),
                message,
            });
        }

        parse_observations(series, &body)
    }
}
