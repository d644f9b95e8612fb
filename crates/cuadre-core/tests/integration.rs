//! Integration tests for the statement pipeline end to end.
//!
//! Uses a MockExtractor that returns pre-built word layouts without
//! invoking pdftotext, so these tests run without poppler-utils.

use cuadre_core::analysis::{StatusFilter, TransactionAnalyzer};
use cuadre_core::analyze_pdf;
use cuadre_core::error::CuadreError;
use cuadre_core::extraction::{BBox, PageWords, PdfExtractor, Word};
use cuadre_core::extractor::{Extraction, OutputFormat, TableExtractor};
use cuadre_core::pagination::{paginate, SalesResponse};
use cuadre_core::profile::builtin::load_preset;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;

struct MockExtractor {
    pages: Vec<PageWords>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _path: &Path) -> Result<Vec<PageWords>, CuadreError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct BrokenExtractor;

impl PdfExtractor for BrokenExtractor {
    fn extract_pages(&self, _path: &Path) -> Result<Vec<PageWords>, CuadreError> {
        Err(CuadreError::PdftotextFailed {
            code: 1,
            stderr: "Syntax Error: Couldn't find trailer dictionary".into(),
        })
    }

    fn backend_name(&self) -> &str {
        "broken"
    }
}

const COLUMN_X: [f32; 10] = [
    10.0, 60.0, 120.0, 180.0, 220.0, 300.0, 350.0, 420.0, 530.0, 590.0,
];

/// Words of one phrase, 4pt per byte and 2pt between words.
fn phrase(x: f32, y: f32, text: &str) -> Vec<Word> {
    let mut cursor = x;
    text.split_whitespace()
        .map(|w| {
            let width = w.len() as f32 * 4.0;
            let word = Word {
                text: w.to_string(),
                bbox: BBox {
                    x_min: cursor,
                    y_min: y,
                    x_max: cursor + width,
                    y_max: y + 8.0,
                },
            };
            cursor += width + 2.0;
            word
        })
        .collect()
}

fn statement_line(y: f32, cells: [&str; 10]) -> Vec<Word> {
    COLUMN_X
        .iter()
        .zip(cells)
        .flat_map(|(x, text)| phrase(*x, y, text))
        .collect()
}

fn header(y: f32) -> Vec<Word> {
    statement_line(
        y,
        [
            "ID",
            "Fecha",
            "Importe Pagado",
            "Mon",
            "ID Proveedor",
            "Descuento",
            "Importe a Pagar",
            "Tipo de Operación",
            "Resultado",
            "Tipo de Pago",
        ],
    )
}

fn page(number: usize, lines: Vec<Vec<Word>>) -> PageWords {
    PageWords {
        page_number: number,
        words: lines.into_iter().flatten().collect(),
    }
}

fn statement() -> MockExtractor {
    MockExtractor {
        pages: vec![
            page(
                1,
                vec![
                    phrase(10.0, 20.0, "Estado de Cuenta del Agente"),
                    header(50.0),
                    statement_line(
                        65.0,
                        [
                            "1001", "01/03/2024", "100.00", "CUP", "53510001", "0.00", "90.00",
                            "Venta de Saldo AT", "Exitosa", "Saldo",
                        ],
                    ),
                    statement_line(
                        80.0,
                        [
                            "1002", "01/03/2024", "50.00", "CUP", "53510002", "0.00", "45.00",
                            "Recarga Movil", "Exitosa", "Saldo",
                        ],
                    ),
                    statement_line(
                        95.0,
                        [
                            "1003", "02/03/2024", "5.00", "CUP", "53510003", "0.00", "5.00",
                            "Estado de Cuenta", "Exitosa", "Saldo",
                        ],
                    ),
                    statement_line(
                        110.0,
                        [
                            "1004", "02/03/2024", "1000.00", "CUP", "53510004", "", "1000.00",
                            "Recarga Bolsa CUP", "Exitosa", "Transferencia",
                        ],
                    ),
                    phrase(10.0, 200.0, "Pagina 1 de 2"),
                ],
            ),
            page(
                2,
                vec![
                    header(50.0),
                    statement_line(
                        65.0,
                        [
                            "1005", "03/03/2024", "30.00", "CUP", "53510005", "0.00", "27.00",
                            "Recarga Nauta AT", "Exitosa", "Saldo",
                        ],
                    ),
                    // Reversal of 1005: same supplier.
                    statement_line(
                        80.0,
                        [
                            "1006", "03/03/2024", "30.00", "CUP", "53510005", "0.00", "27.00",
                            "Recarga Nauta AT", "Exitosa", "Saldo",
                        ],
                    ),
                    statement_line(95.0, ["nan"; 10]),
                    statement_line(
                        110.0,
                        [
                            "1007", "04/03/2024", "20.00", "CUP", "53510007", "0.00", "18.00",
                            "Recarga Movil", "Fallida", "Saldo",
                        ],
                    ),
                ],
            ),
        ],
    }
}

fn open(extractor: &dyn PdfExtractor) -> TransactionAnalyzer {
    analyze_pdf(b"%PDF-1.4", extractor, load_preset("etecsa").unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------
#[test]
fn rows_are_flattened_across_pages_without_nan_rows() {
    let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    let mock = statement();
    let extractor = TableExtractor::new(file.path(), &mock).unwrap();

    let Extraction::Rows(rows) = extractor.extract(OutputFormat::Rows).unwrap() else {
        panic!("expected rows");
    };
    // 4 rows on page 1, 3 on page 2 once the all-nan row is dropped.
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().all(|r| r.len() == 10));
    assert_eq!(rows[0][0].to_string(), "1001");
    assert_eq!(rows[4][0].to_string(), "1005");
    assert_eq!(rows[6][0].to_string(), "1007");
}

#[test]
fn records_map_every_column() {
    let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    let mock = statement();
    let records = TableExtractor::new(file.path(), &mock)
        .unwrap()
        .records()
        .unwrap();

    assert_eq!(records.len(), 7);
    let deposit = &records[3];
    assert_eq!(deposit.id, "1004");
    assert_eq!(deposit.date, "02/03/2024");
    assert_eq!(deposit.amount_paid, dec!(1000.00));
    assert_eq!(deposit.currency, "CUP");
    assert_eq!(deposit.supplier_id, "53510004");
    assert_eq!(deposit.discount, Decimal::ZERO);
    assert_eq!(deposit.amount_due, dec!(1000.00));
    assert_eq!(deposit.transaction_type, "Recarga Bolsa CUP");
    assert_eq!(deposit.transaction_status, "Exitosa");
    assert_eq!(deposit.payment_type, "Transferencia");
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------
#[test]
fn reversal_pair_is_dropped_from_transactions() {
    let analyzer = open(&statement());
    assert!(analyzer.load_error().is_none());
    assert_eq!(analyzer.records().len(), 7);

    let all = analyzer.transactions(StatusFilter::All);
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1001", "1002", "1003", "1004", "1007"]);

    assert_eq!(analyzer.transactions(StatusFilter::Successful).len(), 4);
    assert_eq!(analyzer.transactions(StatusFilter::Failed).len(), 1);
}

#[test]
fn deposits_total_cup_recharges() {
    let analyzer = open(&statement());
    let deposits = analyzer.deposits(StatusFilter::Successful);
    assert_eq!(deposits.total_amount, dec!(1000.00));
    assert_eq!(deposits.records.len(), 1);
}

#[test]
fn sales_successful_totals_and_profit() {
    let analyzer = open(&statement());
    let sales = analyzer.sales(StatusFilter::Successful);
    assert_eq!(sales.total_saldo, dec!(100));
    assert_eq!(sales.total_movil, dec!(50));
    assert_eq!(sales.total_nauta, Decimal::ZERO);
    // Statement fee and deposit are not sales.
    assert_eq!(sales.total_amount, dec!(150));
    assert_eq!(sales.profits, dec!(16.67));
    assert_eq!(sales.records.len(), 2);
}

#[test]
fn sales_all_includes_failed() {
    let analyzer = open(&statement());
    let sales = analyzer.sales(StatusFilter::All);
    assert_eq!(sales.total_movil, dec!(70));
    assert_eq!(sales.total_amount, dec!(170));
    // 170 / 0.9 - 170 = 18.888..
    assert_eq!(sales.profits, dec!(18.89));
}

#[test]
fn sales_response_paginates_records() {
    let analyzer = open(&statement());
    let response = SalesResponse::new(analyzer.sales(StatusFilter::All), Some(1), Some(5)).unwrap();
    assert_eq!(response.page.total, Some(3));
    assert_eq!(response.page.results.len(), 3);
    assert_eq!(response.total_amount, dec!(170));

    let page = paginate(analyzer.transactions(StatusFilter::All), Some(2), Some(5)).unwrap();
    assert!(page.results.is_empty());
    assert_eq!(page.total, Some(5));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------
#[test]
fn extraction_failure_is_kept_on_analyzer() {
    let analyzer = open(&BrokenExtractor);
    assert!(matches!(
        analyzer.load_error(),
        Some(CuadreError::PdftotextFailed { code: 1, .. })
    ));
    assert!(analyzer.transactions(StatusFilter::All).is_empty());
    assert_eq!(analyzer.sales(StatusFilter::All).total_amount, Decimal::ZERO);
}

#[test]
fn short_rows_fail_loudly() {
    let mock = MockExtractor {
        pages: vec![page(
            1,
            vec![
                phrase(10.0, 50.0, "1001"),
                phrase(60.0, 50.0, "01/03/2024"),
                phrase(120.0, 50.0, "100.00"),
                phrase(180.0, 50.0, "CUP"),
                phrase(220.0, 50.0, "53510001"),
            ],
        )],
    };
    let analyzer = open(&mock);
    assert!(matches!(
        analyzer.load_error(),
        Some(CuadreError::MalformedRow { row: 0, .. })
    ));
    assert!(analyzer.records().is_empty());
}

#[test]
fn missing_pdf_is_reported_not_swallowed() {
    let err = TransactionAnalyzer::open(
        "/nonexistent/estado.pdf",
        &statement(),
        load_preset("etecsa").unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, CuadreError::NotFound(_)));
}
