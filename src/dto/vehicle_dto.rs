use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::vehicle::Vehicle;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 12;

// Origen de los datos de /api/vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleSourceKind {
    External,
    Database,
}

impl VehicleSourceKind {
    // Cualquier valor distinto de "database" usa el proveedor externo
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("database") => VehicleSourceKind::Database,
            _ => VehicleSourceKind::External,
        }
    }
}

// Precio finito y no negativo (NaN e infinito no pasan `range`)
fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("price"))
    }
}

// Query params de GET /api/vehicles
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListQuery {
    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,

    pub search: Option<String>,

    #[validate(custom = "validate_price")]
    pub min_price: Option<f64>,

    #[validate(custom = "validate_price")]
    pub max_price: Option<f64>,

    pub source: Option<String>,
}

// Query params de GET /api/vehicles/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleDetailQuery {
    pub source: Option<String>,
}

// Parámetros ya resueltos con sus valores por defecto
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleListParams {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl VehicleListParams {
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }
}

impl VehicleListQuery {
    pub fn source_kind(&self) -> VehicleSourceKind {
        VehicleSourceKind::from_param(self.source.as_deref())
    }

    pub fn params(&self) -> VehicleListParams {
        VehicleListParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            search: self.search.as_deref().unwrap_or("").trim().to_string(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

// Página de vehículos devuelta por cualquier origen
#[derive(Debug, Clone)]
pub struct VehiclePage {
    pub vehicles: Vec<Vehicle>,
    pub total_items: i64,
}
