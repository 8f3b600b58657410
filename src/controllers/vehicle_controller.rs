//! Controller de vehículos
//!
//! Orquesta el validador de formulario, el repositorio y el pipeline de
//! export. Las vistas solo extraen la request y renderizan lo que el
//! controller devuelve.

use std::sync::Arc;

use tracing::info;

use crate::dto::vehicle_dto::{FormErrors, VehicleFormData};
use crate::models::vehicle::{PageInfo, Vehicle, VehicleFilters};
use crate::repositories::catalog_repository::CatalogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::export_service::{ExportArtifact, ExportFormat, ExportService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Resultado de un envío de formulario: guardado o de vuelta al formulario
/// con los errores por campo
#[derive(Debug)]
pub enum FormResult {
    Saved(Vehicle),
    Invalid(FormErrors),
}

pub struct VehicleController {
    vehicles: Arc<VehicleRepository>,
    catalog: Arc<CatalogRepository>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: Arc::clone(&state.vehicles),
            catalog: Arc::clone(&state.catalog),
        }
    }

    pub async fn list(
        &self,
        page: usize,
        page_size: usize,
        filters: &VehicleFilters,
    ) -> (Vec<Vehicle>, PageInfo) {
        self.vehicles.list(page, page_size, filters).await
    }

    pub async fn detail(&self, car_number: &str) -> AppResult<Vehicle> {
        self.vehicles.get(car_number).await
    }

    /// Valida y crea. Un número duplicado vuelve como error de campo sobre
    /// `car_number`, no como página de error.
    pub async fn create(&self, form: &VehicleFormData) -> AppResult<FormResult> {
        let validated = match form.validate(&self.catalog) {
            Ok(validated) => validated,
            Err(errors) => return Ok(FormResult::Invalid(errors)),
        };

        match self.vehicles.create(validated).await {
            Ok(vehicle) => {
                info!("Vehículo {} creado", vehicle.car_number);
                Ok(FormResult::Saved(vehicle))
            }
            Err(AppError::Conflict(_)) => Ok(FormResult::Invalid(FormErrors::conflict(
                form.car_number.trim(),
            ))),
            Err(e) => Err(e),
        }
    }

    /// Valida y actualiza un registro existente. La identidad de la ruta
    /// manda: el `car_number` almacenado nunca cambia por esta vía.
    pub async fn update(&self, car_number: &str, form: &VehicleFormData) -> AppResult<FormResult> {
        // El registro tiene que existir antes de validar el resto
        self.vehicles.get(car_number).await?;

        let mut form = form.clone();
        form.car_number = car_number.to_string();
        let validated = match form.validate(&self.catalog) {
            Ok(validated) => validated,
            Err(errors) => return Ok(FormResult::Invalid(errors)),
        };

        let vehicle = self.vehicles.update(car_number, validated).await?;
        info!("Vehículo {} actualizado", vehicle.car_number);
        Ok(FormResult::Saved(vehicle))
    }

    /// Entrada al flujo de confirmación de borrado: carga el registro sin
    /// mutar nada. Si ya no existe, NotFound.
    pub async fn delete_confirmation(&self, car_number: &str) -> AppResult<Vehicle> {
        self.vehicles.get(car_number).await
    }

    /// Confirmación explícita: ejecuta el borrado
    pub async fn delete_confirmed(&self, car_number: &str) -> AppResult<()> {
        self.vehicles.delete(car_number).await?;
        info!("Vehículo {} eliminado", car_number);
        Ok(())
    }

    /// Export sobre la vista filtrada completa, sin paginar
    pub async fn export(
        &self,
        format: ExportFormat,
        filters: &VehicleFilters,
    ) -> AppResult<ExportArtifact> {
        let vehicles = self.vehicles.list_all(filters).await;
        ExportService::export(format, &vehicles, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvironmentConfig;

    fn test_state() -> AppState {
        let config = EnvironmentConfig {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            session_ttl_hours: 24,
            page_size: 100,
            admin_username: "Manager_Alex".to_string(),
            admin_password: "qwer1234qwer".to_string(),
        };
        AppState::new(config)
    }

    fn valid_form(car_number: &str) -> VehicleFormData {
        VehicleFormData {
            car_number: car_number.to_string(),
            price: "1500000".to_string(),
            year_of_manufacture: "2020".to_string(),
            mileage: "50000".to_string(),
            description: "Тестовый автомобиль".to_string(),
            brand: "1".to_string(),
            enterprise: "1".to_string(),
            purchase_datetime: "2023-01-15T10:30".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_contains_record() {
        let state = test_state();
        let controller = VehicleController::new(&state);

        let result = controller.create(&valid_form("A123BC")).await.unwrap();
        assert!(matches!(result, FormResult::Saved(_)));

        let (items, info) = controller
            .list(1, 100, &VehicleFilters::default())
            .await;
        assert_eq!(info.total_count, 1);
        assert_eq!(items[0].car_number, "A123BC");
    }

    #[tokio::test]
    async fn test_create_duplicate_is_field_error() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        controller.create(&valid_form("A123BC")).await.unwrap();

        let result = controller.create(&valid_form("A123BC")).await.unwrap();
        match result {
            FormResult::Invalid(errors) => {
                assert!(errors.field("car_number").unwrap().contains("уже существует"));
            }
            FormResult::Saved(_) => panic!("duplicate create must not save"),
        }
        assert_eq!(state.vehicles.count().await, 1);
    }

    #[tokio::test]
    async fn test_create_invalid_form_saves_nothing() {
        let state = test_state();
        let controller = VehicleController::new(&state);

        let result = controller.create(&VehicleFormData::default()).await.unwrap();
        assert!(matches!(result, FormResult::Invalid(_)));
        assert_eq!(state.vehicles.count().await, 0);
    }

    #[tokio::test]
    async fn test_update_changes_description_not_identity() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        controller.create(&valid_form("A123BC")).await.unwrap();

        let mut form = valid_form("HACKED");
        form.description = "Обновленное описание".to_string();
        let result = controller.update("A123BC", &form).await.unwrap();

        match result {
            FormResult::Saved(vehicle) => {
                assert_eq!(vehicle.car_number, "A123BC");
                assert_eq!(vehicle.description, "Обновленное описание");
            }
            FormResult::Invalid(_) => panic!("valid update must save"),
        }
        assert!(controller.detail("HACKED").await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let state = test_state();
        let controller = VehicleController::new(&state);

        let err = controller
            .update("Z999ZZ", &valid_form("Z999ZZ"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_flow_entry_does_not_mutate() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        controller.create(&valid_form("A123BC")).await.unwrap();

        controller.delete_confirmation("A123BC").await.unwrap();
        assert_eq!(state.vehicles.count().await, 1);

        controller.delete_confirmed("A123BC").await.unwrap();
        assert_eq!(state.vehicles.count().await, 0);

        // Re-entrar al flujo para un registro desaparecido
        assert!(matches!(
            controller.delete_confirmation("A123BC").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_export_covers_all_pages() {
        let state = test_state();
        let controller = VehicleController::new(&state);
        for i in 0..7 {
            controller
                .create(&valid_form(&format!("K{:03}KK", i)))
                .await
                .unwrap();
        }

        let artifact = controller
            .export(ExportFormat::Json, &VehicleFilters::default())
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&artifact.body).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 7);

        let artifact = controller
            .export(ExportFormat::Csv, &VehicleFilters::default())
            .await
            .unwrap();
        assert_eq!(artifact.body.trim_end().lines().count(), 8);
    }
}
