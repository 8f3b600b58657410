//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del dominio de la consola:
//! vehículos, catálogo de referencia y sesiones.

pub mod catalog;
pub mod session;
pub mod vehicle;
