use crate::model::{FetchError, SeriesId, TimeSeries};

#[async_trait::async_trait]
pub trait SeriesFetcher: Send + Sync {
    async fn fetch(&self, series: SeriesId) -> Result<TimeSeries, FetchError>;
}
