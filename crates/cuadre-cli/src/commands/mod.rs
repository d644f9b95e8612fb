pub mod analyze;
pub mod extract;
pub mod profile;

use cuadre_core::error::CuadreError;
use cuadre_core::extraction::pdftotext::PdftotextExtractor;
use cuadre_core::profile::builtin;
use cuadre_core::profile::schema::StatementProfile;
use std::path::PathBuf;
use std::time::Duration;

/// Options shared by every subcommand.
pub struct Settings {
    pub pdftotext: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub profile: Option<PathBuf>,
    pub preset: Option<String>,
}

impl Settings {
    pub fn extractor(&self) -> PdftotextExtractor {
        let mut extractor = PdftotextExtractor::new();
        if let Some(ref binary) = self.pdftotext {
            extractor = extractor.with_binary(binary);
        }
        if let Some(secs) = self.timeout {
            extractor = extractor.with_timeout(Duration::from_secs(secs));
        }
        extractor
    }

    /// The custom profile file if one was given, else the named or default preset.
    pub fn load_profile(&self) -> Result<StatementProfile, CuadreError> {
        match (&self.profile, &self.preset) {
            (Some(path), _) => cuadre_core::profile::load_profile(path),
            (None, Some(name)) => builtin::load_preset(name),
            (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET),
        }
    }
}

/// Filter and paging options of the analysis subcommands.
pub struct Query {
    pub status: String,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub output: String,
}
