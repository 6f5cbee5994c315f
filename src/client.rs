//! Cliente HTTP del catálogo
//!
//! Consume `GET {base}/vehicles` y `GET {base}/vehicles/:id`, valida el
//! sobre y normaliza cada registro. Las variantes públicas sin `try_`
//! nunca devuelven error: registran el fallo y devuelven un resultado vacío.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::environment::EnvironmentConfig;
use crate::dto::ApiResponse;
use crate::models::vehicle::{RawVehicle, Vehicle};

/// URL base por defecto (la API servida por este mismo binario)
pub const DEFAULT_CATALOG_API_URL: &str = "http://localhost:3000/api";

/// Errores del cliente del catálogo
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Unsuccessful(String),
}

/// Cliente del catálogo de vehículos
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Crear cliente con URL configurable
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Cliente apuntando a CATALOG_API_URL
    pub fn from_config(config: &EnvironmentConfig) -> Result<Self, CatalogError> {
        Self::new(&config.catalog_api_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_envelope<T: DeserializeOwned + Default>(&self, path: &str) -> Result<ApiResponse<T>, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("🌐 GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<ApiResponse<T>>(&body)
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }

    /// Obtener y normalizar todos los vehículos, propagando el error
    pub async fn try_fetch_vehicles(&self) -> Result<Vec<Vehicle>, CatalogError> {
        let envelope = self
            .get_envelope::<Option<Vec<serde_json::Value>>>("/vehicles")
            .await?;

        let records = match (envelope.success, envelope.data) {
            (true, Some(records)) => records,
            (_, _) => {
                return Err(CatalogError::Unsuccessful(
                    envelope
                        .message
                        .unwrap_or_else(|| "Invalid API response structure".to_string()),
                ))
            }
        };

        // Un registro que no es un objeto se descarta sin vaciar el catálogo
        let now = Utc::now();
        Ok(records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<RawVehicle>(record) {
                Ok(raw) => Some(raw.normalize(now)),
                Err(e) => {
                    log::warn!("⚠️ Registro de vehículo descartado: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Obtener vehículos; ante cualquier fallo devuelve una lista vacía
    pub async fn fetch_vehicles(&self) -> Vec<Vehicle> {
        match self.try_fetch_vehicles().await {
            Ok(vehicles) => vehicles,
            Err(e) => {
                log::error!("❌ Error in fetch_vehicles: {}", e);
                Vec::new()
            }
        }
    }

    /// Destacados, más recientes primero (por `createdAt`), hasta `limit`
    pub async fn get_featured_vehicles(&self, limit: usize) -> Vec<Vehicle> {
        featured_vehicles(self.fetch_vehicles().await, limit)
    }

    /// Buscar un vehículo por id; `None` si no existe o si la petición falla
    pub async fn get_vehicle_by_id(&self, id: &str) -> Option<Vehicle> {
        let path = format!("/vehicles/{}", urlencoding::encode(id));

        match self.get_envelope::<Option<RawVehicle>>(&path).await {
            Ok(envelope) => envelope.data.map(Vehicle::from),
            Err(CatalogError::HttpStatus { status }) if status == StatusCode::NOT_FOUND.as_u16() => None,
            Err(e) => {
                log::error!("❌ Error fetching vehicle {}: {}", id, e);
                None
            }
        }
    }

    /// Vehículos de la misma marca, excluyendo el propio, hasta `limit`
    pub async fn get_related_vehicles(&self, vehicle_id: &str, limit: usize) -> Vec<Vehicle> {
        let Some(current) = self.get_vehicle_by_id(vehicle_id).await else {
            return Vec::new();
        };

        related_vehicles(self.fetch_vehicles().await, &current, limit)
    }
}

/// Filtrar destacados y ordenarlos por `createdAt` descendente
pub fn featured_vehicles(vehicles: Vec<Vehicle>, limit: usize) -> Vec<Vehicle> {
    let mut featured: Vec<Vehicle> = vehicles.into_iter().filter(|v| v.featured).collect();
    featured.sort_by(|a, b| {
        let a = a.created_at.as_deref().unwrap_or("");
        let b = b.created_at.as_deref().unwrap_or("");
        b.cmp(a)
    });
    featured.truncate(limit);
    featured
}

/// Misma marca que `current`, sin incluirlo
pub fn related_vehicles(vehicles: Vec<Vehicle>, current: &Vehicle, limit: usize) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .filter(|v| v.id != current.id && v.make == current.make)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, make: &str, featured: bool, created_at: &str) -> Vehicle {
        RawVehicle {
            id: Some(id.to_string()),
            make: Some(make.to_string()),
            featured: Some(featured),
            created_at: Some(created_at.to_string()),
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn test_base_url_from_config() {
        let client = CatalogClient::from_config(&EnvironmentConfig::default()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_CATALOG_API_URL);

        let client = CatalogClient::with_client(Client::new(), "http://cars.test/api/");
        assert_eq!(client.base_url(), "http://cars.test/api");
    }

    #[test]
    fn test_featured_sorted_before_limit() {
        let vehicles = vec![
            vehicle("old", "Kia", true, "2023-01-01T00:00:00.000Z"),
            vehicle("plain", "Kia", false, "2024-09-01T00:00:00.000Z"),
            vehicle("new", "Kia", true, "2024-06-01T00:00:00.000Z"),
            vehicle("mid", "Kia", true, "2024-02-01T00:00:00.000Z"),
        ];

        let featured = featured_vehicles(vehicles, 2);
        let ids: Vec<&str> = featured.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }

    #[test]
    fn test_related_excludes_current() {
        let current = vehicle("a", "Ford", false, "2024-01-01T00:00:00.000Z");
        let vehicles = vec![
            current.clone(),
            vehicle("b", "Ford", false, "2024-01-01T00:00:00.000Z"),
            vehicle("c", "Kia", false, "2024-01-01T00:00:00.000Z"),
            vehicle("d", "Ford", false, "2024-01-01T00:00:00.000Z"),
        ];

        let related = related_vehicles(vehicles, &current, 1);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id, "b");
    }
}
