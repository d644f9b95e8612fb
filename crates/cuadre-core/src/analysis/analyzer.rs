use crate::analysis::outcome::{DepositSummary, SalesSummary};
use crate::error::CuadreError;
use crate::extraction::PdfExtractor;
use crate::extractor::TableExtractor;
use crate::model::TransactionRecord;
use crate::profile::schema::StatementProfile;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which transactions a query covers, by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    #[default]
    Successful,
    Failed,
}

impl FromStr for StatusFilter {
    type Err = CuadreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "successful" => Ok(StatusFilter::Successful),
            "failed" => Ok(StatusFilter::Failed),
            other => Err(CuadreError::InvalidArgument(format!(
                "transaction status must be 'all', 'successful' or 'failed', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Successful => write!(f, "successful"),
            StatusFilter::Failed => write!(f, "failed"),
        }
    }
}

/// Queries over the transactions of one statement.
///
/// Records are fixed at construction; every query recomputes its view from
/// the supplier-deduplicated set.
#[derive(Debug)]
pub struct TransactionAnalyzer {
    records: Vec<TransactionRecord>,
    profile: StatementProfile,
    load_error: Option<CuadreError>,
}

impl TransactionAnalyzer {
    pub fn new(records: Vec<TransactionRecord>, profile: StatementProfile) -> Self {
        TransactionAnalyzer {
            records,
            profile,
            load_error: None,
        }
    }

    /// Extract the records of the PDF at `path`.
    ///
    /// Path validation errors are returned. A failed extraction is logged and
    /// leaves the analyzer empty, with the cause kept in `load_error()`.
    pub fn open(
        path: impl AsRef<Path>,
        backend: &dyn PdfExtractor,
        profile: StatementProfile,
    ) -> Result<Self, CuadreError> {
        let extractor = TableExtractor::new(path, backend)?;
        let analyzer = match extractor.records() {
            Ok(records) => {
                log::info!(
                    "{}: {} transactions extracted",
                    extractor.path().display(),
                    records.len()
                );
                TransactionAnalyzer::new(records, profile)
            }
            Err(e) => {
                log::error!("{}: {}", extractor.path().display(), e);
                TransactionAnalyzer {
                    records: Vec::new(),
                    profile,
                    load_error: Some(e),
                }
            }
        };
        Ok(analyzer)
    }

    /// Read the same records with another statement's labels.
    pub fn with_profile(mut self, profile: StatementProfile) -> Self {
        self.profile = profile;
        self
    }

    /// All records as extracted, duplicates included.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Why extraction failed, when the analyzer was opened on a PDF that
    /// could not be read.
    pub fn load_error(&self) -> Option<&CuadreError> {
        self.load_error.as_ref()
    }

    pub fn profile(&self) -> &StatementProfile {
        &self.profile
    }

    /// Deduplicated transactions with the given outcome.
    pub fn transactions(&self, status: StatusFilter) -> Vec<TransactionRecord> {
        let unique = remove_all_duplicates_by_supplier(&self.records);
        let label = match status {
            StatusFilter::All => return unique,
            StatusFilter::Successful => &self.profile.success_status,
            StatusFilter::Failed => &self.profile.failure_status,
        };
        unique
            .into_iter()
            .filter(|r| &r.transaction_status == label)
            .collect()
    }

    /// Balance deposits into the agent account.
    pub fn deposits(&self, status: StatusFilter) -> DepositSummary {
        let records: Vec<TransactionRecord> = self
            .transactions(status)
            .into_iter()
            .filter(|r| r.transaction_type == self.profile.deposit_type)
            .collect();
        let total: Decimal = records.iter().map(|r| r.amount_paid).sum();

        DepositSummary {
            total_amount: round_money(total),
            records,
        }
    }

    /// Sales per category and the profit on all sales.
    pub fn sales(&self, status: StatusFilter) -> SalesSummary {
        let types = &self.profile.sale_types;
        let mut total_amount = Decimal::ZERO;
        let mut total_saldo = Decimal::ZERO;
        let mut total_propia = Decimal::ZERO;
        let mut total_movil = Decimal::ZERO;
        let mut total_nauta = Decimal::ZERO;
        let mut total_nauta_hogar = Decimal::ZERO;
        let mut total_factura = Decimal::ZERO;
        let mut records = Vec::new();

        for record in self.transactions(status) {
            let kind = record.transaction_type.as_str();
            let amount = record.amount_paid;

            // Buckets and the total accumulate independently.
            if kind == types.saldo {
                total_saldo += amount;
            }
            if kind == types.propia {
                total_propia += amount;
            }
            if kind == types.movil {
                total_movil += amount;
            }
            if kind == types.nauta {
                total_nauta += amount;
            }
            if kind == types.nauta_hogar {
                total_nauta_hogar += amount;
            }
            if kind == types.factura {
                total_factura += amount;
            }
            if kind != self.profile.statement_fee_type && kind != self.profile.deposit_type {
                total_amount += amount;
                records.push(record);
            }
        }

        let profits = total_amount
            .checked_div(self.profile.commission_rate)
            .map(|gross| gross - total_amount)
            .unwrap_or(Decimal::ZERO);

        SalesSummary {
            total_amount: round_money(total_amount),
            total_saldo: round_money(total_saldo),
            total_propia: round_money(total_propia),
            total_movil: round_money(total_movil),
            total_nauta: round_money(total_nauta),
            total_nauta_hogar: round_money(total_nauta_hogar),
            total_factura: round_money(total_factura),
            profits: round_money(profits),
            records,
        }
    }
}

/// Drop every record whose supplier appears more than once.
///
/// A repeated supplier marks a transaction and its reversal; neither is a
/// final transaction, so both go. Order of the kept records is preserved.
pub fn remove_all_duplicates_by_supplier(records: &[TransactionRecord]) -> Vec<TransactionRecord> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.supplier_id.as_str()).or_default() += 1;
    }
    records
        .iter()
        .filter(|r| counts.get(r.supplier_id.as_str()) == Some(&1))
        .cloned()
        .collect()
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}
