//! Modelos del proveedor externo de anuncios (auto.dev)
//!
//! El proveedor devuelve precios y kilometraje como texto ("$15,000",
//! "12,345 mi"); aquí se validan los registros y se convierten a `Vehicle`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{RawVehicle, Vehicle, VehicleCondition};

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap();
}

/// Página de resultados del proveedor
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsPage {
    pub records: Vec<ExternalVehicle>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Registro de anuncio externo
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExternalVehicle {
    pub id: i64,

    #[validate(length(min = 1))]
    pub vin: String,

    #[validate(length(min = 1))]
    pub make: String,

    #[validate(length(min = 1))]
    pub model: String,

    #[validate(range(min = 1000, max = 9999))]
    pub year: i32,

    pub price: String,
    pub mileage: String,
    pub city: String,
    pub state: String,
    pub condition: String,

    #[validate(url)]
    pub primary_photo_url: Option<String>,

    pub body_type: Option<String>,
    pub trim: Option<String>,
    pub dealer_name: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Extraer el primer número de un texto como "$15,000" o "12,345 mi"
pub fn parse_amount(text: &str) -> Option<f64> {
    NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
}

/// Mapear la condición del proveedor ("new", "used", "certified")
pub fn map_condition(condition: &str) -> VehicleCondition {
    if condition.to_lowercase().contains("new") {
        VehicleCondition::BrandNew
    } else {
        VehicleCondition::ForeignUsed
    }
}

impl ExternalVehicle {
    fn location_description(&self) -> String {
        match &self.dealer_name {
            Some(dealer) if !dealer.is_empty() => {
                format!("Listed by {} in {}, {}", dealer, self.city, self.state)
            }
            _ => format!("Located in {}, {}", self.city, self.state),
        }
    }
}

impl From<ExternalVehicle> for Vehicle {
    fn from(listing: ExternalVehicle) -> Self {
        let description = listing.location_description();
        let condition = map_condition(&listing.condition);

        let raw = RawVehicle {
            id: Some(listing.id.to_string()),
            make: Some(listing.make),
            model: Some(listing.model),
            year: Some(i64::from(listing.year)),
            trim: listing.trim,
            price: parse_amount(&listing.price),
            mileage: parse_amount(&listing.mileage),
            vin: Some(listing.vin),
            description: Some(description),
            images: listing.primary_photo_url.map(|url| vec![url]),
            condition: Some(condition.label().to_string()),
            body_type: listing.body_type,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            ..Default::default()
        };

        raw.into()
    }
}
