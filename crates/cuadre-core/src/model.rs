use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Text a missing cell renders as. Row filtering keys on this token.
pub const MISSING_CELL: &str = "nan";

/// A loosely typed table cell as produced by table detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Numeric cell. `text` keeps the source spelling so identifiers such as
    /// "000123" survive text coercion.
    Number { value: Decimal, text: String },
    Text(String),
    Missing,
}

impl Cell {
    pub fn number(value: Decimal) -> Cell {
        Cell::Number {
            value,
            text: value.to_string(),
        }
    }

    pub fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number { .. })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number { text, .. } => write!(f, "{text}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Missing => write!(f, "{MISSING_CELL}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number { value, .. } => Serialize::serialize(value, serializer),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Missing => serializer.serialize_none(),
        }
    }
}

/// One table row, cells in column order.
pub type RawRow = Vec<Cell>;

/// Column order of a statement transaction row.
pub const RECORD_COLUMNS: [&str; 10] = [
    "id",
    "date",
    "amount_paid",
    "currency",
    "supplier_id",
    "discount",
    "amount_due",
    "transaction_type",
    "transaction_status",
    "payment_type",
];

/// A single statement line in structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub date: String,
    pub amount_paid: Decimal,
    pub currency: String,
    pub supplier_id: String,
    pub discount: Decimal,
    pub amount_due: Decimal,
    /// Category label, e.g. "Recarga Movil".
    pub transaction_type: String,
    /// Localized outcome, e.g. "Exitosa" or "Fallida".
    pub transaction_status: String,
    pub payment_type: String,
}
