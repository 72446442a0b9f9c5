// Data fetching: the fetch interface and its FRED implementation

pub mod fred;
pub mod traits;

pub use fred::FredClient;
pub use traits::SeriesFetcher;
