//! Servicio de leads del formulario de contacto
//!
//! No hay backend de persistencia: los leads aceptados se registran en el log.

use validator::Validate;

use crate::dto::api_response::now_timestamp;
use crate::models::contact::{interest_message, ContactAction, ContactRequest, Lead};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

/// Mensaje cuando el formulario llega vacío y no hay vehículo que citar
pub const GENERIC_MESSAGE: &str = "I'd like to know more about your vehicles.";

pub const THANK_YOU_MESSAGE: &str =
    "Your message has been sent successfully. One of our representatives will contact you shortly.";

pub struct ContactService;

impl ContactService {
    /// Validar la request y construir el lead; `vehicle` precarga el mensaje
    pub fn build_lead(request: ContactRequest, vehicle: Option<&Vehicle>) -> AppResult<Lead> {
        request.validate()?;

        let message = if request.message.trim().is_empty() {
            vehicle
                .map(interest_message)
                .unwrap_or_else(|| GENERIC_MESSAGE.to_string())
        } else {
            request.message.trim().to_string()
        };

        Ok(Lead {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone,
            message,
            contact_method: request.contact_method,
            preferred_date: request.preferred_date,
            vehicle_id: request.vehicle_id,
            action: request.action,
            received_at: now_timestamp(),
        })
    }

    /// Registrar el lead (sin persistencia)
    pub fn record(lead: &Lead) {
        let kind = match lead.action {
            ContactAction::TestDrive => "test-drive",
            ContactAction::General => "general",
        };
        log::info!(
            "📨 Nuevo lead ({}): {} <{}> vehicle={:?} method={:?} date={:?}",
            kind,
            lead.name,
            lead.email,
            lead.vehicle_id,
            lead.contact_method,
            lead.preferred_date
        );
        log::debug!("📨 Mensaje del lead: {}", lead.message);
    }
}
