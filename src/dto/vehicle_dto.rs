//! DTOs del formulario de vehículo
//!
//! El formulario llega como campos de texto sin tipar. `VehicleFormData`
//! los valida contra el catálogo de referencia y produce un
//! `ValidatedVehicle` tipado, o un mapa campo → motivo con el que la vista
//! re-renderiza el formulario conservando lo ingresado.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::vehicle::ValidatedVehicle;
use crate::repositories::catalog_repository::CatalogRepository;
use crate::utils::validation::{
    parse_manufacture_year, parse_mileage, parse_price, parse_purchase_datetime,
    parse_reference_id, validate_max_length, validate_not_empty, MIN_MANUFACTURE_YEAR,
};

/// Longitud máxima admitida para el número del vehículo
pub const CAR_NUMBER_MAX_LEN: usize = 20;

/// Campos crudos del formulario de crear/editar
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFormData {
    #[serde(default)]
    pub car_number: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub year_of_manufacture: String,
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub enterprise: String,
    #[serde(default)]
    pub purchase_datetime: String,
}

/// Errores de validación por campo, en orden estable de render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Error de unicidad del número, reportado sobre el campo de identidad
    pub fn conflict(car_number: &str) -> Self {
        let mut errors = Self::new();
        errors.add(
            "car_number",
            format!("Машина с номером {} уже существует.", car_number),
        );
        errors
    }
}

const MSG_REQUIRED: &str = "Обязательное поле.";
const MSG_INVALID_CHOICE: &str =
    "Выберите корректный вариант. Вашего варианта нет среди допустимых значений.";

impl VehicleFormData {
    /// Valida el conjunto de campos y resuelve las referencias de catálogo.
    /// Devuelve todos los errores de una vez, no solo el primero.
    pub fn validate(&self, catalog: &CatalogRepository) -> Result<ValidatedVehicle, FormErrors> {
        let mut errors = FormErrors::new();

        let car_number = self.car_number.trim().to_string();
        if validate_not_empty(&car_number).is_err() {
            errors.add("car_number", MSG_REQUIRED);
        } else if validate_max_length(&car_number, CAR_NUMBER_MAX_LEN).is_err() {
            errors.add(
                "car_number",
                format!(
                    "Номер машины не может быть длиннее {} символов.",
                    CAR_NUMBER_MAX_LEN
                ),
            );
        }

        let price = if self.price.trim().is_empty() {
            errors.add("price", MSG_REQUIRED);
            None
        } else {
            match parse_price(&self.price) {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.add("price", "Введите корректную неотрицательную цену.");
                    None
                }
            }
        };

        let year_of_manufacture = if self.year_of_manufacture.trim().is_empty() {
            errors.add("year_of_manufacture", MSG_REQUIRED);
            None
        } else {
            match parse_manufacture_year(&self.year_of_manufacture) {
                Ok(year) => Some(year),
                Err(_) => {
                    errors.add(
                        "year_of_manufacture",
                        format!(
                            "Укажите год выпуска от {} до следующего года.",
                            MIN_MANUFACTURE_YEAR
                        ),
                    );
                    None
                }
            }
        };

        let mileage = if self.mileage.trim().is_empty() {
            errors.add("mileage", MSG_REQUIRED);
            None
        } else {
            match parse_mileage(&self.mileage) {
                Ok(mileage) => Some(mileage),
                Err(_) => {
                    errors.add("mileage", "Введите неотрицательный целый пробег.");
                    None
                }
            }
        };

        let brand_id = if self.brand.trim().is_empty() {
            errors.add("brand", MSG_REQUIRED);
            None
        } else {
            match parse_reference_id(&self.brand) {
                Ok(id) if catalog.brand(id).is_some() => Some(id),
                _ => {
                    errors.add("brand", MSG_INVALID_CHOICE);
                    None
                }
            }
        };

        let enterprise_id = if self.enterprise.trim().is_empty() {
            errors.add("enterprise", MSG_REQUIRED);
            None
        } else {
            match parse_reference_id(&self.enterprise) {
                Ok(id) if catalog.enterprise(id).is_some() => Some(id),
                _ => {
                    errors.add("enterprise", MSG_INVALID_CHOICE);
                    None
                }
            }
        };

        let purchase_datetime = if self.purchase_datetime.trim().is_empty() {
            None
        } else {
            match parse_purchase_datetime(&self.purchase_datetime) {
                Ok(datetime) => Some(datetime),
                Err(_) => {
                    errors.add("purchase_datetime", "Введите корректные дату и время.");
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedVehicle {
            car_number,
            price: price.expect("validated"),
            year_of_manufacture: year_of_manufacture.expect("validated"),
            mileage: mileage.expect("validated"),
            description: self.description.trim().to_string(),
            purchase_datetime,
            brand_id: brand_id.expect("validated"),
            enterprise_id: enterprise_id.expect("validated"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn valid_form() -> VehicleFormData {
        VehicleFormData {
            car_number: "A123BC".to_string(),
            price: "1500000".to_string(),
            year_of_manufacture: "2020".to_string(),
            mileage: "50000".to_string(),
            description: "Тестовый автомобиль".to_string(),
            brand: "1".to_string(),
            enterprise: "1".to_string(),
            purchase_datetime: "2023-01-15T10:30".to_string(),
        }
    }

    #[test]
    fn test_valid_form_produces_typed_vehicle() {
        let catalog = CatalogRepository::with_defaults();
        let validated = valid_form().validate(&catalog).unwrap();

        assert_eq!(validated.car_number, "A123BC");
        assert_eq!(validated.price, Decimal::from(1_500_000));
        assert_eq!(validated.year_of_manufacture, 2020);
        assert_eq!(validated.mileage, 50_000);
        assert_eq!(validated.brand_id, 1);
        assert_eq!(validated.enterprise_id, 1);
        assert!(validated.purchase_datetime.is_some());
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let catalog = CatalogRepository::with_defaults();
        let errors = VehicleFormData::default().validate(&catalog).unwrap_err();

        for field in ["car_number", "price", "year_of_manufacture", "mileage", "brand", "enterprise"] {
            assert_eq!(errors.field(field), Some(MSG_REQUIRED), "field {}", field);
        }
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let catalog = CatalogRepository::with_defaults();
        let mut form = valid_form();
        form.description = String::new();
        form.purchase_datetime = String::new();

        let validated = form.validate(&catalog).unwrap();
        assert_eq!(validated.description, "");
        assert!(validated.purchase_datetime.is_none());
    }

    #[test]
    fn test_unknown_reference_is_rejected() {
        let catalog = CatalogRepository::with_defaults();
        let mut form = valid_form();
        form.brand = "99".to_string();
        form.enterprise = "nope".to_string();

        let errors = form.validate(&catalog).unwrap_err();
        assert_eq!(errors.field("brand"), Some(MSG_INVALID_CHOICE));
        assert_eq!(errors.field("enterprise"), Some(MSG_INVALID_CHOICE));
    }

    #[test]
    fn test_car_number_is_trimmed() {
        let catalog = CatalogRepository::with_defaults();
        let mut form = valid_form();
        form.car_number = "  A123BC  ".to_string();

        let validated = form.validate(&catalog).unwrap();
        assert_eq!(validated.car_number, "A123BC");
    }

    #[test]
    fn test_price_accepts_comma_separator() {
        let catalog = CatalogRepository::with_defaults();
        let mut form = valid_form();
        form.price = "1500000,50".to_string();

        let validated = form.validate(&catalog).unwrap();
        assert_eq!(validated.price.to_string(), "1500000.50");
    }

    #[test]
    fn test_bad_numbers_are_field_errors() {
        let catalog = CatalogRepository::with_defaults();
        let mut form = valid_form();
        form.price = "дорого".to_string();
        form.year_of_manufacture = "1850".to_string();
        form.mileage = "-10".to_string();
        form.purchase_datetime = "вчера".to_string();

        let errors = form.validate(&catalog).unwrap_err();
        assert!(errors.field("price").is_some());
        assert!(errors.field("year_of_manufacture").is_some());
        assert!(errors.field("mileage").is_some());
        assert!(errors.field("purchase_datetime").is_some());
    }
}
