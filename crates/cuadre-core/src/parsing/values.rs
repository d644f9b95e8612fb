use crate::error::CuadreError;
use crate::model::Cell;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Type a cell from its detected text.
///
/// Handles formats like:
/// - "" -> Missing
/// - "100" -> Number(100)
/// - "1,250.50" -> Number(1250.50) (thousands comma)
/// - "1.250,50" -> Number(1250.50) (decimal comma)
/// - "12,5" -> Number(12.5)
/// - "Recarga Movil" -> Text
pub fn parse_cell(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() {
        return Cell::Missing;
    }
    match parse_decimal(s) {
        Ok(value) => Cell::Number {
            value,
            text: s.to_string(),
        },
        Err(_) => Cell::Text(s.to_string()),
    }
}

/// Parse an amount, accepting either comma or dot as the decimal separator.
pub fn parse_decimal(s: &str) -> Result<Decimal, CuadreError> {
    let s = s.trim();
    if s.is_empty() || !s.chars().any(|c| c.is_ascii_digit()) {
        return Err(CuadreError::InvalidArgument(format!("not a number: '{s}'")));
    }
    let normalized = normalize_separators(s);
    Decimal::from_str(&normalized)
        .map_err(|e| CuadreError::InvalidArgument(format!("invalid number '{}': {}", s, e)))
}

fn normalize_separators(s: &str) -> String {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');
    match (last_comma, last_dot) {
        // Both present: whichever comes last is the decimal separator.
        (Some(c), Some(d)) if c > d => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(c), None) => {
            let decimals = s.len() - c - 1;
            if s.matches(',').count() == 1 && decimals != 3 {
                s.replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_decimal("100").unwrap(), dec!(100));
    }

    #[test]
    fn test_thousands_comma() {
        assert_eq!(parse_decimal("1,250.50").unwrap(), dec!(1250.50));
        assert_eq!(parse_decimal("1,250").unwrap(), dec!(1250));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_decimal("12,5").unwrap(), dec!(12.5));
        assert_eq!(parse_decimal("1.250,50").unwrap(), dec!(1250.50));
    }

    #[test]
    fn test_negative() {
        assert_eq!(parse_decimal("-15.00").unwrap(), dec!(-15.00));
    }

    #[test]
    fn test_invalid_returns_error() {
        assert!(parse_decimal("Exitosa").is_err());
        assert!(parse_decimal("12/03/2024").is_err());
        assert!(parse_decimal(",").is_err());
    }

    #[test]
    fn test_parse_cell_types() {
        assert_eq!(parse_cell("   "), Cell::Missing);
        assert_eq!(parse_cell(" CUP "), Cell::text("CUP"));
        assert!(parse_cell("53512345").is_number());
    }

    #[test]
    fn test_parse_cell_keeps_leading_zeros_in_text() {
        assert_eq!(parse_cell("000123").to_string(), "000123");
    }
}
