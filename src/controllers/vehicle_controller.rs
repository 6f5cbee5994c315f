use validator::Validate;

use crate::dto::vehicle_dto::{VehicleListQuery, VehicleSourceKind};
use crate::dto::{ApiResponse, Pagination};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct VehicleController {
    state: AppState,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, query: VehicleListQuery) -> AppResult<ApiResponse<Vec<Vehicle>>> {
        // Validar paginación y precios
        query.validate()?;

        let params = query.params();
        let source = self.state.vehicle_source(query.source_kind())?;
        tracing::info!(
            "🚗 Listando vehículos desde '{}' (page {}, pageSize {})",
            source.name(),
            params.page,
            params.page_size
        );

        let page = source.list(&params).await?;

        Ok(ApiResponse::paginated(
            page.vehicles,
            Pagination {
                page: params.page,
                page_size: params.page_size,
                total_items: page.total_items,
            },
        ))
    }

    pub async fn get_by_id(&self, id: &str, kind: VehicleSourceKind) -> AppResult<ApiResponse<Vehicle>> {
        let vehicle = self.find(id, kind).await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(ApiResponse::success(vehicle))
    }

    pub async fn find(&self, id: &str, kind: VehicleSourceKind) -> AppResult<Option<Vehicle>> {
        let source = self.state.vehicle_source(kind)?;
        source.find(id).await
    }
}
