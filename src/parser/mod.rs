// FRED response parsing

pub mod fred_parser;

pub use fred_parser::{parse_error_message, parse_observations};
