//! Catálogo de referencia
//!
//! Proveedor de solo lectura de Brand y Enterprise. La consola no administra
//! estos datos: se siembran al arrancar y solo se consultan para poblar los
//! selectores del formulario y resolver los nombres derivados del listado.

use crate::models::catalog::{Brand, Enterprise, VehicleType};

pub struct CatalogRepository {
    brands: Vec<Brand>,
    enterprises: Vec<Enterprise>,
}

impl CatalogRepository {
    pub fn new(brands: Vec<Brand>, enterprises: Vec<Enterprise>) -> Self {
        Self { brands, enterprises }
    }

    /// Catálogo sembrado de desarrollo
    pub fn with_defaults() -> Self {
        let brands = vec![
            Brand {
                id: 1,
                name: "ГАЗ".to_string(),
                vehicle_type: VehicleType::Truck,
                fuel_tank_capacity_liters: 105,
                load_capacity_kg: 3500,
                seats_number: 3,
            },
            Brand {
                id: 2,
                name: "КамАЗ".to_string(),
                vehicle_type: VehicleType::Truck,
                fuel_tank_capacity_liters: 350,
                load_capacity_kg: 14000,
                seats_number: 2,
            },
            Brand {
                id: 3,
                name: "Lada".to_string(),
                vehicle_type: VehicleType::Sedan,
                fuel_tank_capacity_liters: 50,
                load_capacity_kg: 400,
                seats_number: 5,
            },
            Brand {
                id: 4,
                name: "Volvo".to_string(),
                vehicle_type: VehicleType::Bus,
                fuel_tank_capacity_liters: 300,
                load_capacity_kg: 5000,
                seats_number: 45,
            },
        ];
        let enterprises = vec![
            Enterprise {
                id: 1,
                name: "Автопарк Центральный".to_string(),
                timezone: "Europe/Moscow".to_string(),
            },
            Enterprise {
                id: 2,
                name: "Северная логистика".to_string(),
                timezone: "Europe/Moscow".to_string(),
            },
            Enterprise {
                id: 3,
                name: "Грузовые перевозки Восток".to_string(),
                timezone: "Asia/Yekaterinburg".to_string(),
            },
        ];
        Self::new(brands, enterprises)
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn enterprises(&self) -> &[Enterprise] {
        &self.enterprises
    }

    pub fn brand(&self, id: i64) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id == id)
    }

    pub fn enterprise(&self, id: i64) -> Option<&Enterprise> {
        self.enterprises.iter().find(|e| e.id == id)
    }

    /// Nombre de marca para columnas derivadas; cadena vacía si la referencia
    /// ya no existe (no debería pasar: el validador la resuelve al escribir)
    pub fn brand_name(&self, id: i64) -> String {
        self.brand(id).map(|b| b.name.clone()).unwrap_or_default()
    }

    pub fn enterprise_name(&self, id: i64) -> String {
        self.enterprise(id).map(|e| e.name.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookups() {
        let catalog = CatalogRepository::with_defaults();
        assert!(catalog.brand(1).is_some());
        assert!(catalog.enterprise(1).is_some());
        assert!(catalog.brand(99).is_none());
        assert!(catalog.enterprise(99).is_none());
        assert_eq!(catalog.brand_name(2), "КамАЗ");
        assert_eq!(catalog.enterprise_name(99), "");
    }
}
