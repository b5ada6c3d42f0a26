//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Patrón de teléfono: prefijo internacional opcional + 9-15 dígitos
    pub static ref PHONE_RE: Regex = Regex::new(r"^\+?1?\d{9,15}$").unwrap();
}

/// Validar número de teléfono contra el patrón fijo
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("phone");
    error.add_param("value".into(), &value.to_string());
    error.add_param(
        "format".into(),
        &"Phone number must be entered in the format: +999999999".to_string(),
    );
    Err(error)
}

/// Validar que un importe o medida no sea negativo.
/// Las columnas correspondientes llevan CHECK (>= 0) en la base de
/// datos; rechazar aquí devuelve 400 en lugar de un error de base.
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        return Ok(());
    }
    let mut error = ValidationError::new("non_negative");
    error.add_param("value".into(), value);
    error.add_param("min".into(), &0);
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern_accepts_international_prefix() {
        assert!(validate_phone_number("+34612345678").is_ok());
        assert!(validate_phone_number("612345678").is_ok());
        assert!(validate_phone_number("+1123456789012345").is_ok());
    }

    #[test]
    fn test_phone_pattern_rejects_malformed() {
        // demasiado corto
        assert!(validate_phone_number("12345678").is_err());
        // caracteres no numéricos
        assert!(validate_phone_number("+34-612-345-678").is_err());
        assert!(validate_phone_number("telefono").is_err());
        assert!(validate_phone_number("").is_err());
    }

    #[test]
    fn test_non_negative_accepts_zero_and_positive() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(12550, 2)).is_ok());
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        let err = validate_non_negative(&Decimal::new(-1, 2)).unwrap_err();
        assert_eq!(err.code, "non_negative");
    }
}
