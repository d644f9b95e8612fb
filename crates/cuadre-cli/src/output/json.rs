use cuadre_core::error::CuadreError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), CuadreError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
