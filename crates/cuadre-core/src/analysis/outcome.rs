use crate::model::TransactionRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deposits into the agent account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositSummary {
    /// Sum of `amount_paid` over `records`, rounded to cents.
    pub total_amount: Decimal,
    pub records: Vec<TransactionRecord>,
}

/// Sales broken down by category, with the agent's profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Every sale that is neither a deposit nor the statement fee.
    pub total_amount: Decimal,
    pub total_saldo: Decimal,
    pub total_propia: Decimal,
    pub total_movil: Decimal,
    pub total_nauta: Decimal,
    pub total_nauta_hogar: Decimal,
    pub total_factura: Decimal,
    /// `total_amount / commission_rate - total_amount`, from the unrounded total.
    pub profits: Decimal,
    /// The records counted in `total_amount`, in statement order.
    pub records: Vec<TransactionRecord>,
}
