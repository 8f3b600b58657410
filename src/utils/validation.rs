//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos de los campos del formulario de vehículo.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use num_traits::Zero;
use rust_decimal::Decimal;
use std::str::FromStr;
use validator::ValidationError;

/// Año mínimo aceptado como año de fabricación
pub const MIN_MANUFACTURE_YEAR: i32 = 1900;

/// Validar que un string no esté vacío después de recortar espacios
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud máxima en caracteres
pub fn validate_max_length(value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        let mut error = ValidationError::new("max_length");
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + Zero + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Parsear un precio decimal no negativo. Se acepta coma como separador
/// decimal y se normaliza a punto.
pub fn parse_price(value: &str) -> Result<Decimal, ValidationError> {
    let normalized = value.trim().replace(',', ".");
    let price = Decimal::from_str(&normalized).map_err(|_| {
        let mut error = ValidationError::new("decimal");
        error.add_param("value".into(), &value.to_string());
        error
    })?;
    validate_non_negative(price)?;
    Ok(price)
}

/// Parsear el año de fabricación dentro del rango plausible:
/// desde 1900 hasta el año en curso más uno.
pub fn parse_manufacture_year(value: &str) -> Result<i32, ValidationError> {
    let year: i32 = value.trim().parse().map_err(|_| {
        let mut error = ValidationError::new("year");
        error.add_param("value".into(), &value.to_string());
        error
    })?;
    let max_year = Utc::now().year() + 1;
    if year < MIN_MANUFACTURE_YEAR || year > max_year {
        let mut error = ValidationError::new("year_range");
        error.add_param("min".into(), &MIN_MANUFACTURE_YEAR);
        error.add_param("max".into(), &max_year);
        error.add_param("actual".into(), &year);
        return Err(error);
    }
    Ok(year)
}

/// Parsear el kilometraje como entero no negativo
pub fn parse_mileage(value: &str) -> Result<i64, ValidationError> {
    let mileage: i64 = value.trim().parse().map_err(|_| {
        let mut error = ValidationError::new("integer");
        error.add_param("value".into(), &value.to_string());
        error
    })?;
    validate_non_negative(mileage)?;
    Ok(mileage)
}

/// Parsear un id de catálogo enviado por un `<select>`
pub fn parse_reference_id(value: &str) -> Result<i64, ValidationError> {
    value.trim().parse().map_err(|_| {
        let mut error = ValidationError::new("reference_id");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Parsear la fecha y hora de compra. El formulario envía el formato de un
/// input `datetime-local` (`YYYY-MM-DDTHH:MM`); también se aceptan segundos
/// y RFC 3339 para datos importados.
pub fn parse_purchase_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    let mut error = ValidationError::new("datetime");
    error.add_param("value".into(), &value.to_string());
    error.add_param("format".into(), &"YYYY-MM-DDTHH:MM".to_string());
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("A123BC").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_max_length() {
        assert!(validate_max_length("A123BC", 20).is_ok());
        assert!(validate_max_length(&"X".repeat(21), 20).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1500000").unwrap(), Decimal::from_str("1500000").unwrap());
        assert_eq!(parse_price("99,90").unwrap(), Decimal::from_str("99.90").unwrap());
        assert!(parse_price("-1").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("").is_err());
    }

    #[test]
    fn test_parse_manufacture_year() {
        assert_eq!(parse_manufacture_year("2020").unwrap(), 2020);
        assert!(parse_manufacture_year("1899").is_err());
        let future = Utc::now().year() + 2;
        assert!(parse_manufacture_year(&future.to_string()).is_err());
        assert!(parse_manufacture_year("year").is_err());
    }

    #[test]
    fn test_parse_mileage() {
        assert_eq!(parse_mileage("50000").unwrap(), 50000);
        assert_eq!(parse_mileage("0").unwrap(), 0);
        assert!(parse_mileage("-5").is_err());
        assert!(parse_mileage("12.5").is_err());
    }

    #[test]
    fn test_parse_reference_id() {
        assert_eq!(parse_reference_id("1").unwrap(), 1);
        assert!(parse_reference_id("").is_err());
        assert!(parse_reference_id("uno").is_err());
    }

    #[test]
    fn test_parse_purchase_datetime() {
        let parsed = parse_purchase_datetime("2023-01-15T10:30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2023-01-15T10:30:00+00:00");

        assert!(parse_purchase_datetime("2023-01-15T10:30:45").is_ok());
        assert!(parse_purchase_datetime("2023-01-15T10:30:00+03:00").is_ok());
        assert!(parse_purchase_datetime("15.01.2023").is_err());
    }
}
