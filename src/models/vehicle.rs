//! Modelo de Vehicle
//!
//! Este módulo contiene el registro principal de la consola y sus variantes
//! para las operaciones CRUD. La identidad del registro es `car_number`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Vehículo de la flota. `car_number` es único dentro de la colección viva;
/// la comparación es exacta y sensible a mayúsculas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub car_number: String,
    pub price: Decimal,
    pub year_of_manufacture: i32,
    pub mileage: i64,
    pub description: String,
    pub purchase_datetime: Option<DateTime<Utc>>,
    pub brand_id: i64,
    pub enterprise_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Conjunto de campos que ya pasó el validador de formulario y es seguro
/// de persistir. Las referencias de catálogo se resolvieron al validar.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVehicle {
    pub car_number: String,
    pub price: Decimal,
    pub year_of_manufacture: i32,
    pub mileage: i64,
    pub description: String,
    pub purchase_datetime: Option<DateTime<Utc>>,
    pub brand_id: i64,
    pub enterprise_id: i64,
}

/// Filtros para el listado y el export de vehículos
#[derive(Debug, Clone, Default)]
pub struct VehicleFilters {
    pub enterprise_id: Option<i64>,
    pub brand_id: Option<i64>,
}

impl VehicleFilters {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(enterprise_id) = self.enterprise_id {
            if vehicle.enterprise_id != enterprise_id {
                return false;
            }
        }
        if let Some(brand_id) = self.brand_id {
            if vehicle.brand_id != brand_id {
                return false;
            }
        }
        true
    }
}

/// Metadatos de paginación expuestos al listado
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    /// Calcula la página efectiva para `total_count` registros. Las páginas
    /// fuera de rango se ajustan al rango válido en lugar de fallar.
    pub fn clamped(page: usize, page_size: usize, total_count: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = if total_count == 0 {
            1
        } else {
            total_count.div_ceil(page_size)
        };
        let page = page.clamp(1, total_pages);
        Self {
            page,
            page_size,
            total_pages,
            total_count,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }

    /// Rango de índices (inicio, fin exclusivo) que cubre esta página
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_count);
        (start.min(self.total_count), end)
    }
}
