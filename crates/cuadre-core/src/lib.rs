pub mod analysis;
pub mod error;
pub mod extraction;
pub mod extractor;
pub mod model;
pub mod pagination;
pub mod parsing;
pub mod profile;

use analysis::TransactionAnalyzer;
use error::CuadreError;
use extraction::PdfExtractor;
use profile::schema::StatementProfile;
use std::io::Write;

/// Main API entry point: analyze a statement PDF received as bytes.
///
/// The bytes are written to a temporary `.pdf` file for the extraction
/// backend; the file is removed when this returns.
pub fn analyze_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    profile: StatementProfile,
) -> Result<TransactionAnalyzer, CuadreError> {
    let mut tmpfile = tempfile::Builder::new()
        .prefix("cuadre-")
        .suffix(".pdf")
        .tempfile()?;
    tmpfile.write_all(pdf_bytes)?;
    tmpfile.flush()?;

    TransactionAnalyzer::open(tmpfile.path(), extractor, profile)
}
