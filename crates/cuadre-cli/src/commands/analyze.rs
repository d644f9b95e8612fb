use cuadre_core::analysis::{StatusFilter, TransactionAnalyzer};
use cuadre_core::error::CuadreError;
use cuadre_core::pagination::{paginate, DepositsResponse, SalesResponse};
use std::path::PathBuf;

use super::{Query, Settings};
use crate::output;

pub fn transactions(
    settings: &Settings,
    pdf_file: PathBuf,
    query: &Query,
) -> Result<(), CuadreError> {
    let status: StatusFilter = query.status.parse()?;
    let analyzer = open(settings, pdf_file)?;
    let response = paginate(analyzer.transactions(status), query.page, query.limit)?;

    match query.output.as_str() {
        "json" => output::json::print(&response)?,
        _ => println!("{}", output::table::format_transactions(&response, status)),
    }
    Ok(())
}

pub fn deposits(settings: &Settings, pdf_file: PathBuf, query: &Query) -> Result<(), CuadreError> {
    let status: StatusFilter = query.status.parse()?;
    let analyzer = open(settings, pdf_file)?;
    let response = DepositsResponse::new(analyzer.deposits(status), query.page, query.limit)?;

    match query.output.as_str() {
        "json" => output::json::print(&response)?,
        _ => println!("{}", output::table::format_deposits(&response, status)),
    }
    Ok(())
}

pub fn sales(settings: &Settings, pdf_file: PathBuf, query: &Query) -> Result<(), CuadreError> {
    let status: StatusFilter = query.status.parse()?;
    let analyzer = open(settings, pdf_file)?;
    let response = SalesResponse::new(analyzer.sales(status), query.page, query.limit)?;

    match query.output.as_str() {
        "json" => output::json::print(&response)?,
        _ => println!(
            "{}",
            output::table::format_sales(&response, status, analyzer.profile())
        ),
    }
    Ok(())
}

/// Open the statement and fail if its table could not be read.
fn open(settings: &Settings, pdf_file: PathBuf) -> Result<TransactionAnalyzer, CuadreError> {
    let profile = settings.load_profile()?;
    let backend = settings.extractor();
    let analyzer = TransactionAnalyzer::open(&pdf_file, &backend, profile)?;

    if let Some(e) = analyzer.load_error() {
        return Err(CuadreError::Extraction(e.to_string()));
    }
    Ok(analyzer)
}
