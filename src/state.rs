//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::repositories::catalog_repository::CatalogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::session_service::SessionService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<VehicleRepository>,
    pub catalog: Arc<CatalogRepository>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        let sessions = Arc::new(SessionService::new(&config));
        Self {
            config,
            vehicles: Arc::new(VehicleRepository::new()),
            catalog: Arc::new(CatalogRepository::with_defaults()),
            sessions,
        }
    }
}
