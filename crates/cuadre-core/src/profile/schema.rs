use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Labels a statement uses for outcomes and transaction categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// `transaction_status` of a completed transaction.
    pub success_status: String,
    /// `transaction_status` of a rejected transaction.
    pub failure_status: String,
    /// `transaction_type` of a balance deposit into the agent account.
    pub deposit_type: String,
    /// `transaction_type` of the statement fee line.
    pub statement_fee_type: String,
    pub sale_types: SaleTypes,
    /// Share of the sale price the agent pays; profit is the rest.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
}

/// `transaction_type` labels of the sales buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleTypes {
    pub saldo: String,
    pub propia: String,
    pub movil: String,
    pub nauta: String,
    pub nauta_hogar: String,
    pub factura: String,
}

impl SaleTypes {
    pub fn labels(&self) -> [&str; 6] {
        [
            self.saldo.as_str(),
            self.propia.as_str(),
            self.movil.as_str(),
            self.nauta.as_str(),
            self.nauta_hogar.as_str(),
            self.factura.as_str(),
        ]
    }
}

fn default_commission_rate() -> Decimal {
    Decimal::new(9, 1)
}
