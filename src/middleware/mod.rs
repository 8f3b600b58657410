//! Middleware del sistema
//!
//! Este módulo contiene el middleware de sesión que protege las rutas
//! de vehículos.

pub mod auth;

pub use auth::*;
