//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno
//! y los valores por defecto de la consola.

pub mod environment;

pub use environment::*;
