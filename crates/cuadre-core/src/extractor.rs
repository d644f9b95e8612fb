use crate::error::CuadreError;
use crate::extraction::table::{detect_tables, PageTable, TableSettings};
use crate::extraction::PdfExtractor;
use crate::model::{Cell, RawRow, TransactionRecord, MISSING_CELL};
use crate::parsing::rows_to_records;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Shape of the data returned by `TableExtractor::extract`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw positional rows.
    Rows,
    /// Structured transaction records.
    #[default]
    Records,
}

impl FromStr for OutputFormat {
    type Err = CuadreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rows" => Ok(OutputFormat::Rows),
            "records" => Ok(OutputFormat::Records),
            other => Err(CuadreError::InvalidArgument(format!(
                "format must be 'rows' or 'records', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Rows => write!(f, "rows"),
            OutputFormat::Records => write!(f, "records"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Extraction {
    Rows(Vec<RawRow>),
    Records(Vec<TransactionRecord>),
}

impl Extraction {
    pub fn len(&self) -> usize {
        match self {
            Extraction::Rows(rows) => rows.len(),
            Extraction::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the transaction table of one statement PDF.
///
/// Constructed once per file; the path is validated up front and nothing else
/// is checked until `extract` runs table detection.
pub struct TableExtractor<'a> {
    path: PathBuf,
    backend: &'a dyn PdfExtractor,
    settings: TableSettings,
}

impl<'a> TableExtractor<'a> {
    pub fn new(
        path: impl AsRef<Path>,
        backend: &'a dyn PdfExtractor,
    ) -> Result<Self, CuadreError> {
        let path = path.as_ref();
        let Some(text) = path.to_str() else {
            return Err(CuadreError::InvalidArgument(format!(
                "file path must be valid text: {}",
                path.display()
            )));
        };

        if !path.exists() {
            return Err(CuadreError::NotFound(path.to_path_buf()));
        }

        if !text.to_lowercase().ends_with(".pdf") {
            return Err(CuadreError::InvalidFormat(format!(
                "file must have a .pdf extension: {text}"
            )));
        }

        Ok(TableExtractor {
            path: path.to_path_buf(),
            backend,
            settings: TableSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: TableSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detect tables on every page, flatten them and drop empty rows.
    pub fn extract(&self, format: OutputFormat) -> Result<Extraction, CuadreError> {
        let tables = self.read_tables()?;
        let rows = flatten_pages(tables);
        log::debug!(
            "{}: {} rows kept via {}",
            self.path.display(),
            rows.len(),
            self.backend.backend_name()
        );

        match format {
            OutputFormat::Rows => Ok(Extraction::Rows(rows)),
            OutputFormat::Records => Ok(Extraction::Records(rows_to_records(&rows)?)),
        }
    }

    pub fn rows(&self) -> Result<Vec<RawRow>, CuadreError> {
        Ok(flatten_pages(self.read_tables()?))
    }

    pub fn records(&self) -> Result<Vec<TransactionRecord>, CuadreError> {
        rows_to_records(&self.rows()?)
    }

    fn read_tables(&self) -> Result<Vec<PageTable>, CuadreError> {
        let pages = self.backend.extract_pages(&self.path).map_err(|e| match e {
            CuadreError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                CuadreError::NotFound(self.path.clone())
            }
            CuadreError::PdftotextNotFound
            | CuadreError::PdftotextFailed { .. }
            | CuadreError::Timeout(_)
            | CuadreError::NotFound(_) => e,
            other => CuadreError::Extraction(format!(
                "failed to read table data, check that the file is a valid statement PDF: {other}"
            )),
        })?;
        Ok(detect_tables(&pages, &self.settings))
    }
}

/// Concatenate page tables in page order, keeping only important rows.
pub fn flatten_pages(tables: Vec<PageTable>) -> Vec<RawRow> {
    tables
        .into_iter()
        .flat_map(|table| table.rows)
        .filter(|row| is_important_row(row))
        .collect()
}

/// False when every cell of the row renders as the missing-value token.
///
/// The check joins the cell texts and tests that the result is a nonempty
/// repetition of `nan`, so a literal "nan" text cell counts as missing too.
pub fn is_important_row(row: &[Cell]) -> bool {
    let joined: String = row.iter().map(|c| c.to_string()).collect();
    !is_repeated_token(&joined, MISSING_CELL)
}

fn is_repeated_token(s: &str, token: &str) -> bool {
    !s.is_empty()
        && s.len() % token.len() == 0
        && s.as_bytes()
            .chunks(token.len())
            .all(|chunk| chunk == token.as_bytes())
}
