use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{VehicleDetailQuery, VehicleListQuery, VehicleSourceKind};
use crate::dto::ApiResponse;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

// Las respuestas del proveedor externo se pueden cachear en el CDN
pub const EXTERNAL_CACHE_CONTROL: &str = "public, s-maxage=3600";

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
}

fn query_error(rejection: QueryRejection) -> AppError {
    bad_request_error(&rejection.body_text())
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<VehicleListQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(query_error)?;
    let kind = query.source_kind();

    let controller = VehicleController::new(state);
    let body = controller.list(query).await?;

    let mut response = Json(body).into_response();
    if kind == VehicleSourceKind::External {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(EXTERNAL_CACHE_CONTROL),
        );
    }
    Ok(response)
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VehicleDetailQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let Query(query) = query.map_err(query_error)?;
    let kind = VehicleSourceKind::from_param(query.source.as_deref());

    let controller = VehicleController::new(state);
    let response = controller.get_by_id(&id, kind).await?;
    Ok(Json(response))
}
