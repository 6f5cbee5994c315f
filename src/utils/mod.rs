//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y el debounce
//! del buscador.

pub mod debounce;
pub mod errors;
