use async_trait::async_trait;

use crate::dto::vehicle_dto::{VehicleListParams, VehiclePage};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

/// Origen de datos de `/api/vehicles` (proveedor externo o base de datos)
#[async_trait]
pub trait VehicleSource: Send + Sync {
    /// Nombre corto para logs
    fn name(&self) -> &'static str;

    /// Página de vehículos filtrada por búsqueda y precio
    async fn list(&self, params: &VehicleListParams) -> AppResult<VehiclePage>;

    /// Vehículo por id; `Ok(None)` si no existe
    async fn find(&self, id: &str) -> AppResult<Option<Vehicle>>;
}
