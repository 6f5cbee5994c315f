//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del catálogo: el vehículo
//! normalizado, los registros del proveedor externo y los leads.

pub mod contact;
pub mod listing;
pub mod vehicle;

pub use vehicle::{Drivetrain, RawVehicle, Vehicle, VehicleCondition, PLACEHOLDER_IMAGE};
