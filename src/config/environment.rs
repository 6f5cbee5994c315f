//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto salvo las credenciales,
//! cuya ausencia solo es un error para el origen que las necesita.

use anyhow::{Context, Result};
use std::env;

use crate::client::DEFAULT_CATALOG_API_URL;
use crate::services::listings_service::DEFAULT_LISTINGS_BASE_URL;

/// Nombre de la variable con la clave del proveedor externo
pub const AUTO_DEV_API_KEY_VAR: &str = "AUTO_DEV_API_KEY";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub auto_dev_api_key: Option<String>,
    pub auto_dev_base_url: String,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub catalog_api_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            auto_dev_api_key: None,
            auto_dev_base_url: DEFAULT_LISTINGS_BASE_URL.to_string(),
            database_url: None,
            database_max_connections: 10,
            catalog_api_url: DEFAULT_CATALOG_API_URL.to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno (tras `dotenvy::dotenv()`)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match non_empty_var("PORT") {
            Some(port) => port.parse().context("PORT must be a valid number")?,
            None => defaults.port,
        };

        let database_max_connections = match non_empty_var("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            None => defaults.database_max_connections,
        };

        Ok(Self {
            environment: non_empty_var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            cors_origins: non_empty_var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            auto_dev_api_key: non_empty_var(AUTO_DEV_API_KEY_VAR),
            auto_dev_base_url: non_empty_var("AUTO_DEV_BASE_URL").unwrap_or(defaults.auto_dev_base_url),
            database_url: non_empty_var("DATABASE_URL"),
            database_max_connections,
            catalog_api_url: non_empty_var("CATALOG_API_URL").unwrap_or(defaults.catalog_api_url),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Nivel de log cuando RUST_LOG no está definido
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_development() {
            "debug"
        } else {
            "info"
        }
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
