pub mod pdftotext;
pub mod table;

use crate::error::CuadreError;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn x_center(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }
}

/// A single word positioned on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub bbox: BBox,
}

/// Words extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageWords {
    pub page_number: usize,
    pub words: Vec<Word>,
}

/// Trait for PDF word extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned words from the PDF at `path`, one PageWords per page.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageWords>, CuadreError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
