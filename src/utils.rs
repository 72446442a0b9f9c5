// Utility functions
use chrono::NaiveDate;

/// Parses a FRED `YYYY-MM-DD` date string.
pub fn parse_fred_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Formats a number with `,` thousands separators and fixed decimals.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Millions of USD rendered as trillions, e.g. `$5.83T`.
pub fn format_trillions(millions: f64) -> String {
    format!("${:.2}T", millions / 1e6)
}

/// Signed value with fixed decimals or `n/a` when undefined.
pub fn format_signed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:+.*}", decimals, v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fred_date() {
        assert_eq!(
            parse_fred_date("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_fred_date("03/01/2024"), None);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(67234.4, 0), "67,234");
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(999.0, 0), "999");
        assert_eq!(format_thousands(-1500.0, 0), "-1,500");
        assert_eq!(format_thousands(0.0, 1), "0.0");
    }

    #[test]
    fn test_format_trillions_and_signed() {
        assert_eq!(format_trillions(5_830_000.0), "$5.83T");
        assert_eq!(format_signed(Some(1.234), 2), "+1.23");
        assert_eq!(format_signed(Some(-0.5), 3), "-0.500");
        assert_eq!(format_signed(None, 2), "n/a");
    }
}
