use crate::error::{ForecastError, Result};

/// Trim whitespace and strip outer quotes if present.
pub fn clean_cell(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Round to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Parse a births cell and round it to a whole number, keeping it an f64.
pub fn parse_births(raw: &str, column: &str, row: usize) -> Result<f64> {
    let cell = clean_cell(raw);
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(round_to(v, 0)),
        _ => Err(value_parse(raw, column, row)),
    }
}

/// Parse a year cell as an integer.
pub fn parse_year(raw: &str, column: &str, row: usize) -> Result<i32> {
    clean_cell(raw)
        .parse::<i32>()
        .map_err(|_| value_parse(raw, column, row))
}

fn value_parse(raw: &str, column: &str, row: usize) -> ForecastError {
    ForecastError::ValueParse {
        column: column.to_string(),
        row,
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn births_round_to_whole_numbers() {
        assert_eq!(parse_births("123.6", "Födda", 0).unwrap(), 124.0);
        assert_eq!(parse_births(" 100 ", "Födda", 0).unwrap(), 100.0);
        assert_eq!(parse_births("\"98.2\"", "Födda", 0).unwrap(), 98.0);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(round_to(122.5, 0), 122.0);
        assert_eq!(round_to(123.5, 0), 124.0);
        assert_eq!(round_to(12.25, 1), 12.2);
        assert_eq!(round_to(0.1234 * 100.0, 1), 12.3);
        assert_eq!(round_to(-4.56, 1), -4.6);
    }

    #[test]
    fn unparsable_births_report_cell() {
        match parse_births("..", "Födda", 7).unwrap_err() {
            ForecastError::ValueParse { column, row, value } => {
                assert_eq!(column, "Födda");
                assert_eq!(row, 7);
                assert_eq!(value, "..");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse_births("inf", "Födda", 0).is_err());
        assert!(parse_births("NaN", "Födda", 0).is_err());
    }

    #[test]
    fn years_are_integers() {
        assert_eq!(parse_year("2031", "år", 0).unwrap(), 2031);
        assert!(matches!(
            parse_year("2031.5", "år", 3),
            Err(ForecastError::ValueParse { row: 3, .. })
        ));
        assert!(parse_year("", "år", 0).is_err());
    }
}
