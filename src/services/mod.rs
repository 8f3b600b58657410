//! Servicios del sistema
//!
//! Este módulo contiene el servicio de sesiones y el pipeline de export.

pub mod export_service;
pub mod session_service;
