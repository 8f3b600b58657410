//! Entidades de referencia del catálogo
//!
//! Brand y Enterprise son datos de consulta: la consola los usa para poblar
//! los selectores del formulario y para las columnas derivadas del listado.
//! No se administran desde este subsistema.

use serde::Serialize;

/// Tipo de vehículo que fabrica una marca
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Sedan,
    Truck,
    Bus,
    Suv,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub fuel_tank_capacity_liters: u32,
    pub load_capacity_kg: u32,
    pub seats_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enterprise {
    pub id: i64,
    pub name: String,
    /// Zona horaria en la que opera el parque, como etiqueta IANA
    pub timezone: String,
}
