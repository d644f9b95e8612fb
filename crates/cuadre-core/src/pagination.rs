use crate::analysis::{DepositSummary, SalesSummary};
use crate::error::CuadreError;
use crate::model::TransactionRecord;
use rust_decimal::Decimal;
use serde::Serialize;

/// Smallest page size a caller may ask for.
pub const MIN_PAGE_LIMIT: usize = 5;

/// A slice of a result list. `total`, `page` and `limit` are only set when the
/// caller asked for pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub results: Vec<T>,
}

/// Cut `results` to the 1-based `page` of `limit` items.
///
/// Without both `page` and `limit` the full list is returned unpaginated.
pub fn paginate<T>(
    results: Vec<T>,
    page: Option<usize>,
    limit: Option<usize>,
) -> Result<Page<T>, CuadreError> {
    let (Some(page), Some(limit)) = (page, limit) else {
        return Ok(Page {
            total: None,
            page: None,
            limit: None,
            results,
        });
    };

    if page < 1 {
        return Err(CuadreError::InvalidArgument("page must be 1 or greater".into()));
    }
    if limit < MIN_PAGE_LIMIT {
        return Err(CuadreError::InvalidArgument(format!(
            "limit must be {MIN_PAGE_LIMIT} or greater, got {limit}"
        )));
    }

    let total = results.len();
    let start = (page - 1).saturating_mul(limit).min(total);
    let end = page.saturating_mul(limit).min(total);
    let results = results.into_iter().skip(start).take(end - start).collect();

    Ok(Page {
        total: Some(total),
        page: Some(page),
        limit: Some(limit),
        results,
    })
}

pub type TransactionsResponse = Page<TransactionRecord>;

/// Totals serialize as JSON numbers; record amounts stay exact decimal strings.
#[derive(Debug, Clone, Serialize)]
pub struct DepositsResponse {
    #[serde(flatten)]
    pub page: Page<TransactionRecord>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl DepositsResponse {
    pub fn new(
        summary: DepositSummary,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Self, CuadreError> {
        Ok(DepositsResponse {
            page: paginate(summary.records, page, limit)?,
            total_amount: summary.total_amount,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesResponse {
    #[serde(flatten)]
    pub page: Page<TransactionRecord>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_saldo: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_propia: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_movil: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_nauta: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_nauta_hogar: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_factura: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profits: Decimal,
}

impl SalesResponse {
    pub fn new(
        summary: SalesSummary,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Self, CuadreError> {
        Ok(SalesResponse {
            page: paginate(summary.records, page, limit)?,
            total_amount: summary.total_amount,
            total_saldo: summary.total_saldo,
            total_propia: summary.total_propia,
            total_movil: summary.total_movil,
            total_nauta: summary.total_nauta,
            total_nauta_hogar: summary.total_nauta_hogar,
            total_factura: summary.total_factura,
            profits: summary.profits,
        })
    }
}
