pub mod values;

use crate::error::CuadreError;
use crate::model::{Cell, RawRow, TransactionRecord, RECORD_COLUMNS};
use rust_decimal::Decimal;
use values::parse_decimal;

/// Map statement rows into transaction records.
///
/// `row` numbers in errors are zero-based positions in `rows`.
pub fn rows_to_records(rows: &[RawRow]) -> Result<Vec<TransactionRecord>, CuadreError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| row_to_record(i, row))
        .collect()
}

/// Map one row positionally into a `TransactionRecord`.
///
/// This is the only place that knows the statement's column order. Rows with
/// fewer than ten cells are rejected; cells past the tenth are ignored.
pub fn row_to_record(index: usize, row: &[Cell]) -> Result<TransactionRecord, CuadreError> {
    if row.len() < RECORD_COLUMNS.len() {
        return Err(CuadreError::MalformedRow {
            row: index,
            reason: format!(
                "expected {} cells, found {}",
                RECORD_COLUMNS.len(),
                row.len()
            ),
        });
    }

    Ok(TransactionRecord {
        id: row[0].to_string(),
        date: row[1].to_string(),
        amount_paid: required_amount(index, row, 2)?,
        currency: row[3].to_string(),
        supplier_id: row[4].to_string(),
        // Statements leave the discount column blank when none applies.
        discount: if row[5].is_missing() {
            Decimal::ZERO
        } else {
            required_amount(index, row, 5)?
        },
        amount_due: required_amount(index, row, 6)?,
        transaction_type: row[7].to_string(),
        transaction_status: row[8].to_string(),
        payment_type: row[9].to_string(),
    })
}

fn required_amount(index: usize, row: &[Cell], column: usize) -> Result<Decimal, CuadreError> {
    let malformed = |detail: String| CuadreError::MalformedRow {
        row: index,
        reason: format!("{} {}", RECORD_COLUMNS[column], detail),
    };
    match &row[column] {
        Cell::Number { value, .. } => Ok(*value),
        Cell::Text(s) => parse_decimal(s).map_err(|_| malformed(format!("'{s}' is not a number"))),
        Cell::Missing => Err(malformed("is empty".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_row() -> RawRow {
        vec![
            Cell::number(dec!(1001)),
            Cell::text("01/03/2024 10:15"),
            Cell::number(dec!(100.00)),
            Cell::text("CUP"),
            Cell::Number {
                value: dec!(53512345),
                text: "53512345".into(),
            },
            Cell::number(dec!(0)),
            Cell::number(dec!(90.00)),
            Cell::text("Venta de Saldo AT"),
            Cell::text("Exitosa"),
            Cell::text("Saldo"),
        ]
    }

    #[test]
    fn test_row_to_record_positional() {
        let rec = row_to_record(0, &sample_row()).unwrap();
        assert_eq!(rec.id, "1001");
        assert_eq!(rec.amount_paid, dec!(100.00));
        assert_eq!(rec.supplier_id, "53512345");
        assert_eq!(rec.amount_due, dec!(90.00));
        assert_eq!(rec.transaction_type, "Venta de Saldo AT");
        assert_eq!(rec.transaction_status, "Exitosa");
        assert_eq!(rec.payment_type, "Saldo");
    }

    #[test]
    fn test_short_row_fails() {
        let mut row = sample_row();
        row.truncate(9);
        let err = row_to_record(4, &row).unwrap_err();
        assert!(matches!(err, CuadreError::MalformedRow { row: 4, .. }));
    }

    #[test]
    fn test_extra_cells_ignored() {
        let mut row = sample_row();
        row.push(Cell::text("extra"));
        assert!(row_to_record(0, &row).is_ok());
    }

    #[test]
    fn test_text_amount_parsed() {
        let mut row = sample_row();
        row[2] = Cell::text("1,250.50");
        assert_eq!(row_to_record(0, &row).unwrap().amount_paid, dec!(1250.50));
    }

    #[test]
    fn test_missing_amount_fails() {
        let mut row = sample_row();
        row[2] = Cell::Missing;
        assert!(row_to_record(0, &row).is_err());
    }

    #[test]
    fn test_missing_discount_is_zero() {
        let mut row = sample_row();
        row[5] = Cell::Missing;
        assert_eq!(row_to_record(0, &row).unwrap().discount, Decimal::ZERO);
    }

    #[test]
    fn test_missing_supplier_coerced_to_text() {
        let mut row = sample_row();
        row[4] = Cell::Missing;
        assert_eq!(row_to_record(0, &row).unwrap().supplier_id, "nan");
    }
}
