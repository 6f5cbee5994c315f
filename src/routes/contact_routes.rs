use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::controllers::contact_controller::ContactController;
use crate::dto::ApiResponse;
use crate::models::contact::{ContactRequest, Lead};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_contact_router() -> Router<AppState> {
    Router::new().route("/", post(submit_contact))
}

async fn submit_contact(
    State(state): State<AppState>,
    request: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Lead>>, AppError> {
    let Json(request) = request.map_err(|e| bad_request_error(&e.body_text()))?;

    let controller = ContactController::new(state);
    let response = controller.submit(request).await?;
    Ok(Json(response))
}
