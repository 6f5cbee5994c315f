//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Es inmutable: solo configuración, el pool
//! opcional de PostgreSQL y el cliente HTTP reutilizable.

use reqwest::Client;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::environment::{EnvironmentConfig, AUTO_DEV_API_KEY_VAR};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::listings_service::ListingsService;
use crate::services::vehicle_source::VehicleSource;
use crate::dto::vehicle_dto::VehicleSourceKind;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub pool: Option<PgPool>,
    pub config: EnvironmentConfig,
    pub http_client: Client,
}

impl AppState {
    pub fn new(pool: Option<PgPool>, config: EnvironmentConfig) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            pool,
            config,
            http_client,
        })
    }

    /// Origen para búsquedas internas: la base de datos si está configurada
    pub fn preferred_source(&self) -> VehicleSourceKind {
        if self.pool.is_some() {
            VehicleSourceKind::Database
        } else {
            VehicleSourceKind::External
        }
    }

    /// Resolver el origen de datos pedido por la request
    pub fn vehicle_source(&self, kind: VehicleSourceKind) -> AppResult<Box<dyn VehicleSource>> {
        match kind {
            VehicleSourceKind::Database => {
                let pool = self.pool.clone().ok_or_else(|| {
                    AppError::ServiceUnavailable("DATABASE_URL is not configured".to_string())
                })?;
                Ok(Box::new(VehicleRepository::new(pool)))
            }
            VehicleSourceKind::External => {
                let api_key = self.config.auto_dev_api_key.clone().ok_or_else(|| {
                    AppError::Configuration(format!(
                        "{} is not set in environment variables.",
                        AUTO_DEV_API_KEY_VAR
                    ))
                })?;
                Ok(Box::new(ListingsService::new(
                    self.http_client.clone(),
                    &self.config.auto_dev_base_url,
                    api_key,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_is_reported_per_source() {
        let state = AppState::new(None, EnvironmentConfig::default()).unwrap();

        match state.vehicle_source(VehicleSourceKind::External) {
            Err(AppError::Configuration(msg)) => {
                assert_eq!(msg, "AUTO_DEV_API_KEY is not set in environment variables.")
            }
            _ => panic!("expected configuration error"),
        }

        assert!(matches!(
            state.vehicle_source(VehicleSourceKind::Database),
            Err(AppError::ServiceUnavailable(_))
        ));
    }

    #[test]
    fn test_external_source_with_key() {
        let config = EnvironmentConfig {
            auto_dev_api_key: Some("key".to_string()),
            ..EnvironmentConfig::default()
        };
        let state = AppState::new(None, config).unwrap();
        let source = state.vehicle_source(VehicleSourceKind::External).unwrap();
        assert_eq!(source.name(), "external");
    }
}
