//! Services module
//!
//! Este módulo contiene la lógica de negocio: el motor de filtrado del
//! inventario, la vista de inventario, el proveedor externo de anuncios
//! y los leads del formulario de contacto.

pub mod contact_service;
pub mod inventory_filter;
pub mod inventory_view;
pub mod listings_service;
pub mod vehicle_source;

pub use inventory_filter::*;
pub use vehicle_source::VehicleSource;
