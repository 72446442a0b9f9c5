// FRED-specific JSON parsing
use crate::model::{FetchError, SeriesId, TimeSeries};
use crate::utils::parse_fred_date;
use chrono::NaiveDate;
use serde::Deserialize;

/// FRED publishes a single dot for a missing observation.
const MISSING_VALUE: &str = ".";

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error_message: String,
}

/// Decodes a `series/observations` body into a time series.
pub fn parse_observations(series: SeriesId, body: &str) -> Result<TimeSeries, FetchError> {
    let response: ObservationsResponse =
        serde_json::from_str(body).map_err(|source| FetchError::Decode { series, source })?;

    let points = response
        .observations
        .into_iter()
        .map(|obs| -> Result<(NaiveDate, Option<f64>), FetchError> {
            let date = parse_fred_date(&obs.date).ok_or_else(|| FetchError::InvalidDate {
                series,
                value: obs.date.clone(),
            })?;

            let raw = obs.value.trim();
            if raw == MISSING_VALUE {
                return Ok((date, None));
            }
            let value = raw.parse::<f64>().map_err(|_| FetchError::InvalidValue {
                series,
                date,
                value: obs.value.clone(),
            })?;
            Ok((date, Some(value)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TimeSeries::from_points(series, points))
}

/// Extracts FRED's `error_message` from an error body, if there is one.
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error_message)
}
