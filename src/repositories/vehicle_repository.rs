//! Repositorio de vehículos
//!
//! Colección autoritativa de registros Vehicle. El estado vive en memoria
//! detrás de un RwLock; cada operación de escritura toma el lock una sola
//! vez, así la verificación de unicidad y la inserción son atómicas.

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::vehicle::{PageInfo, ValidatedVehicle, Vehicle, VehicleFilters};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleRepository {
    // Orden de inserción = orden estable del listado
    vehicles: RwLock<Vec<Vehicle>>,
}

impl VehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: RwLock::new(Vec::new()),
        }
    }

    /// Listado paginado sobre la vista filtrada. Devuelve los registros de la
    /// página pedida y los metadatos para renderizar los controles de página.
    pub async fn list(
        &self,
        page: usize,
        page_size: usize,
        filters: &VehicleFilters,
    ) -> (Vec<Vehicle>, PageInfo) {
        let vehicles = self.vehicles.read().await;
        let matching: Vec<&Vehicle> = vehicles.iter().filter(|v| filters.matches(v)).collect();
        let page_info = PageInfo::clamped(page, page_size, matching.len());
        let (start, end) = page_info.slice_bounds();
        let items = matching[start..end].iter().map(|v| (*v).clone()).collect();
        (items, page_info)
    }

    /// Vista filtrada completa, sin paginar. La usa el export.
    pub async fn list_all(&self, filters: &VehicleFilters) -> Vec<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles.iter().filter(|v| filters.matches(v)).cloned().collect()
    }

    pub async fn get(&self, car_number: &str) -> AppResult<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles
            .iter()
            .find(|v| v.car_number == car_number)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Машина {} не найдена", car_number)))
    }

    /// Inserta un registro nuevo. Falla con Conflict si ya existe un vehículo
    /// con el mismo `car_number`; de dos creates concurrentes con el mismo
    /// número, exactamente uno observa el éxito.
    pub async fn create(&self, draft: ValidatedVehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        if vehicles.iter().any(|v| v.car_number == draft.car_number) {
            return Err(AppError::Conflict(format!(
                "Машина с номером {} уже существует",
                draft.car_number
            )));
        }
        let now = Utc::now();
        let vehicle = Vehicle {
            car_number: draft.car_number,
            price: draft.price,
            year_of_manufacture: draft.year_of_manufacture,
            mileage: draft.mileage,
            description: draft.description,
            purchase_datetime: draft.purchase_datetime,
            brand_id: draft.brand_id,
            enterprise_id: draft.enterprise_id,
            created_at: now,
            updated_at: now,
        };
        vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    /// Reemplaza todos los campos mutables del registro. La identidad no
    /// cambia por esta vía: se conserva el `car_number` almacenado.
    pub async fn update(&self, car_number: &str, draft: ValidatedVehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.car_number == car_number)
            .ok_or_else(|| AppError::NotFound(format!("Машина {} не найдена", car_number)))?;

        vehicle.price = draft.price;
        vehicle.year_of_manufacture = draft.year_of_manufacture;
        vehicle.mileage = draft.mileage;
        vehicle.description = draft.description;
        vehicle.purchase_datetime = draft.purchase_datetime;
        vehicle.brand_id = draft.brand_id;
        vehicle.enterprise_id = draft.enterprise_id;
        vehicle.updated_at = Utc::now();
        Ok(vehicle.clone())
    }

    pub async fn delete(&self, car_number: &str) -> AppResult<()> {
        let mut vehicles = self.vehicles.write().await;
        let position = vehicles
            .iter()
            .position(|v| v.car_number == car_number)
            .ok_or_else(|| AppError::NotFound(format!("Машина {} не найдена", car_number)))?;
        vehicles.remove(position);
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.vehicles.read().await.len()
    }
}

impl Default for VehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}
