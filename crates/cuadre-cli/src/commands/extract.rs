use cuadre_core::error::CuadreError;
use cuadre_core::extraction::table::TableSettings;
use cuadre_core::extractor::{Extraction, OutputFormat, TableExtractor};
use std::path::PathBuf;

use super::Settings;
use crate::output;

pub fn run(
    settings: &Settings,
    pdf_file: PathBuf,
    format: &str,
    output_format: &str,
    min_columns: Option<usize>,
) -> Result<(), CuadreError> {
    let format: OutputFormat = format.parse()?;
    if min_columns.is_some_and(|n| n < 2) {
        return Err(CuadreError::InvalidArgument("min-columns must be 2 or greater".into()));
    }
    let backend = settings.extractor();
    let mut extractor = TableExtractor::new(&pdf_file, &backend)?;
    if let Some(min_columns) = min_columns {
        extractor = extractor.with_settings(TableSettings {
            min_columns,
            ..TableSettings::default()
        });
    }
    let extraction = extractor.extract(format)?;

    match output_format {
        "json" => output::json::print(&extraction)?,
        _ => match &extraction {
            Extraction::Rows(rows) => println!("{}", output::table::format_rows(rows)),
            Extraction::Records(records) => {
                println!("{}", output::table::format_records(records))
            }
        },
    }

    eprintln!(
        "{} {} extracted from {}",
        extraction.len(),
        format,
        pdf_file.display()
    );
    Ok(())
}
