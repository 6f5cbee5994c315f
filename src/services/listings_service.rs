//! Servicio del proveedor externo de anuncios (auto.dev)
//!
//! Traduce los parámetros de `/api/vehicles` a la API del proveedor,
//! valida cada registro recibido y lo convierte a `Vehicle`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use validator::Validate;

use crate::dto::vehicle_dto::{VehicleListParams, VehiclePage};
use crate::models::listing::{ExternalVehicle, ListingsPage};
use crate::models::vehicle::Vehicle;
use crate::services::vehicle_source::VehicleSource;
use crate::utils::errors::{AppError, AppResult};

/// URL base por defecto del proveedor
pub const DEFAULT_LISTINGS_BASE_URL: &str = "https://auto.dev/api";

pub struct ListingsService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ListingsService {
    pub fn new(client: Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Construir la URL de listado con los filtros opcionales
    pub fn listings_url(&self, params: &VehicleListParams) -> String {
        let mut url = format!(
            "{}/listings?apikey={}&page={}&pageSize={}&search={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            params.page,
            params.page_size,
            urlencoding::encode(&params.search)
        );

        if let Some(min) = params.min_price {
            url.push_str(&format!("&price_min={}", min));
        }
        if let Some(max) = params.max_price {
            url.push_str(&format!("&price_max={}", max));
        }

        url
    }

    fn listing_url(&self, id: &str) -> String {
        format!(
            "{}/listings/{}?apikey={}",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_text(&self, url: &str) -> AppResult<(StatusCode, String)> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Auto.dev request failed: {}", e)))?;

        let status = response.status();
        log::info!("📡 Auto.dev response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Auto.dev body unreadable: {}", e)))?;

        Ok((status, body))
    }
}

fn validate_listing(listing: &ExternalVehicle) -> AppResult<()> {
    listing.validate().map_err(|e| {
        AppError::ExternalApi(format!("Invalid listing {}: {}", listing.id, e))
    })
}

#[async_trait]
impl VehicleSource for ListingsService {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn list(&self, params: &VehicleListParams) -> AppResult<VehiclePage> {
        log::info!(
            "🚗 Consultando auto.dev: page={} pageSize={} search='{}'",
            params.page,
            params.page_size,
            params.search
        );

        let (status, body) = self.get_text(&self.listings_url(params)).await?;
        if !status.is_success() {
            log::error!("❌ Auto.dev API error {}: {}", status, body);
            return Err(AppError::ExternalApi(format!(
                "Auto.dev API error: {}",
                status.canonical_reason().unwrap_or("unknown status")
            )));
        }

        let page: ListingsPage = serde_json::from_str(&body)
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse listings response: {}", e)))?;

        for listing in &page.records {
            validate_listing(listing)?;
        }

        let vehicles: Vec<Vehicle> = page.records.into_iter().map(Vehicle::from).collect();
        let total_items = page.total_count.unwrap_or(vehicles.len() as i64);

        log::info!("✅ {} anuncios recibidos (total {})", vehicles.len(), total_items);
        Ok(VehiclePage { vehicles, total_items })
    }

    async fn find(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let (status, body) = self.get_text(&self.listing_url(id)).await?;

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!("Auto.dev API error: {}", status)));
        }

        let listing: ExternalVehicle = serde_json::from_str(&body)
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse listing: {}", e)))?;
        validate_listing(&listing)?;

        Ok(Some(listing.into()))
    }
}
