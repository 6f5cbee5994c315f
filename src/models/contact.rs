//! Modelo de solicitud de contacto (lead)
//!
//! Los leads se validan y se registran en el log; no se persisten.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::vehicle::Vehicle;

/// Canal preferido de respuesta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
}

/// Motivo del contacto
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContactAction {
    #[default]
    General,
    TestDrive,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Request del formulario de contacto
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 5000))]
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub contact_method: ContactMethod,

    pub preferred_date: Option<NaiveDate>,

    pub vehicle_id: Option<String>,

    #[serde(default)]
    pub action: ContactAction,
}

/// Lead aceptado, tal como queda registrado
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub contact_method: ContactMethod,
    pub preferred_date: Option<NaiveDate>,
    pub vehicle_id: Option<String>,
    pub action: ContactAction,
    pub received_at: String,
}

/// Mensaje precargado cuando el cliente llega desde la ficha de un vehículo
pub fn interest_message(vehicle: &Vehicle) -> String {
    format!("I'm interested in the {}.", vehicle.title())
}
