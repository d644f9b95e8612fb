use crate::error::CuadreError;
use crate::profile::schema::StatementProfile;

const ETECSA_JSON: &str = include_str!("../../../../profiles/etecsa.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["etecsa"];

/// Preset used when no profile is given.
pub const DEFAULT_PRESET: &str = "etecsa";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<StatementProfile, CuadreError> {
    match name {
        "etecsa" => {
            let profile: StatementProfile = serde_json::from_str(ETECSA_JSON)?;
            Ok(profile)
        }
        _ => Err(CuadreError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
