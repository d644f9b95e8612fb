pub mod builtin;
pub mod schema;

use crate::error::CuadreError;
use rust_decimal::Decimal;
use schema::StatementProfile;
use std::collections::HashSet;
use std::path::Path;

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<StatementProfile, CuadreError> {
    let content = std::fs::read_to_string(path).map_err(|e| CuadreError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<StatementProfile, CuadreError> {
    let profile: StatementProfile =
        serde_json::from_str(json).map_err(|e| CuadreError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<StatementProfile, CuadreError> {
    let profile: StatementProfile = serde_json::from_str(json).map_err(CuadreError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &StatementProfile) -> Result<(), CuadreError> {
    let named = [
        ("success_status", profile.success_status.as_str()),
        ("failure_status", profile.failure_status.as_str()),
        ("deposit_type", profile.deposit_type.as_str()),
        ("statement_fee_type", profile.statement_fee_type.as_str()),
    ];
    for (field, label) in named {
        if label.trim().is_empty() {
            return Err(CuadreError::ProfileInvalid(format!("{field} must not be empty")));
        }
    }

    if profile.success_status == profile.failure_status {
        return Err(CuadreError::ProfileInvalid(format!(
            "success and failure status share the label '{}'",
            profile.success_status
        )));
    }

    let mut seen = HashSet::new();
    for label in profile.sale_types.labels() {
        if label.trim().is_empty() {
            return Err(CuadreError::ProfileInvalid(
                "sale type labels must not be empty".into(),
            ));
        }
        if label == profile.deposit_type || label == profile.statement_fee_type {
            return Err(CuadreError::ProfileInvalid(format!(
                "sale type '{label}' is also the deposit or statement fee type"
            )));
        }
        if !seen.insert(label) {
            return Err(CuadreError::ProfileInvalid(format!(
                "sale type '{label}' is listed twice"
            )));
        }
    }

    if profile.commission_rate <= Decimal::ZERO || profile.commission_rate >= Decimal::ONE {
        return Err(CuadreError::ProfileInvalid(format!(
            "commission_rate must be between 0 and 1, got {}",
            profile.commission_rate
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "name": "Test",
        "version": "1.0",
        "success_status": "OK",
        "failure_status": "KO",
        "deposit_type": "Deposit",
        "statement_fee_type": "Fee",
        "sale_types": {
            "saldo": "A", "propia": "B", "movil": "C",
            "nauta": "D", "nauta_hogar": "E", "factura": "F"
        }
    }"#;

    #[test]
    fn test_parse_valid_profile_defaults_rate() {
        let p = parse_profile_str(VALID).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.commission_rate, Decimal::new(9, 1));
    }

    #[test]
    fn test_same_status_labels_rejected() {
        let json = VALID.replace(r#""failure_status": "KO""#, r#""failure_status": "OK""#);
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_sale_type_equal_to_deposit_rejected() {
        let json = VALID.replace(r#""movil": "C""#, r#""movil": "Deposit""#);
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_duplicate_sale_type_rejected() {
        let json = VALID.replace(r#""movil": "C""#, r#""movil": "A""#);
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_commission_rate_bounds() {
        let json = VALID.replace(
            r#""statement_fee_type": "Fee","#,
            r#""statement_fee_type": "Fee", "commission_rate": "1.5","#,
        );
        assert!(matches!(
            parse_profile_str(&json),
            Err(CuadreError::ProfileInvalid(_))
        ));
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, CuadreError::ProfileLoad { .. }));
    }
}
