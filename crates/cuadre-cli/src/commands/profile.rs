use cuadre_core::error::CuadreError;
use cuadre_core::profile::builtin;
use cuadre_core::profile::schema::StatementProfile;
use std::path::Path;

use super::Settings;

pub fn show(settings: &Settings, name: Option<&str>) -> Result<(), CuadreError> {
    let profile = match name {
        Some(name) => builtin::load_preset(name)?,
        None => settings.load_profile()?,
    };
    print_profile(&profile);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CuadreError> {
    let profile = cuadre_core::profile::load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", profile.name, profile.version);
    println!(
        "  Statuses: {} / {}",
        profile.success_status, profile.failure_status
    );
    println!("  Commission rate: {}", profile.commission_rate);
    Ok(())
}

fn print_profile(profile: &StatementProfile) {
    println!("{} (version {})\n", profile.name, profile.version);
    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    let types = &profile.sale_types;
    let labels = [
        ("Successful", profile.success_status.as_str()),
        ("Failed", profile.failure_status.as_str()),
        ("Deposit", profile.deposit_type.as_str()),
        ("Statement fee", profile.statement_fee_type.as_str()),
        ("Sales: saldo", types.saldo.as_str()),
        ("Sales: propia", types.propia.as_str()),
        ("Sales: movil", types.movil.as_str()),
        ("Sales: nauta", types.nauta.as_str()),
        ("Sales: nauta hogar", types.nauta_hogar.as_str()),
        ("Sales: factura", types.factura.as_str()),
    ];
    for (what, label) in labels {
        println!("  {:<20} {}", what, label);
    }
    println!();
    println!(
        "Profit is total sales / {} - total sales.",
        profile.commission_rate
    );
}
