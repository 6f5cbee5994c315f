use validator::Validate;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::ApiResponse;
use crate::models::contact::{ContactRequest, Lead};
use crate::services::contact_service::{ContactService, THANK_YOU_MESSAGE};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct ContactController {
    state: AppState,
}

impl ContactController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn submit(&self, request: ContactRequest) -> AppResult<ApiResponse<Lead>> {
        request.validate()?;

        // Solo se busca el vehículo si hay que precargar el mensaje
        let vehicle = match (&request.vehicle_id, request.message.trim().is_empty()) {
            (Some(id), true) => {
                let vehicles = VehicleController::new(self.state.clone());
                match vehicles.find(id, self.state.preferred_source()).await {
                    Ok(found) => found,
                    Err(e) => {
                        log::warn!("⚠️ No se pudo precargar el vehículo {}: {}", id, e);
                        None
                    }
                }
            }
            _ => None,
        };

        let lead = ContactService::build_lead(request, vehicle.as_ref())?;
        ContactService::record(&lead);

        Ok(ApiResponse::success_with_message(lead, THANK_YOU_MESSAGE.to_string()))
    }
}
