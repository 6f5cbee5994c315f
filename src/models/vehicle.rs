//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del catálogo y su forma "cruda"
//! tal como llega por la red. Todo registro crudo pasa por `normalize`
//! antes de llegar al motor de filtrado.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Imagen por defecto cuando un registro no trae fotos
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Condición comercial del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum VehicleCondition {
    #[serde(rename = "Brand New")]
    BrandNew,
    #[serde(rename = "Foreign Used")]
    ForeignUsed,
    #[default]
    #[serde(rename = "Nigerian Used")]
    NigerianUsed,
}

impl VehicleCondition {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleCondition::BrandNew => "Brand New",
            VehicleCondition::ForeignUsed => "Foreign Used",
            VehicleCondition::NigerianUsed => "Nigerian Used",
        }
    }
}

impl fmt::Display for VehicleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brand new" => Ok(VehicleCondition::BrandNew),
            "foreign used" => Ok(VehicleCondition::ForeignUsed),
            "nigerian used" => Ok(VehicleCondition::NigerianUsed),
            other => Err(format!("Condición de vehículo desconocida: '{}'", other)),
        }
    }
}

/// Tracción
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Drivetrain {
    #[serde(rename = "FWD")]
    Fwd,
    #[serde(rename = "RWD")]
    Rwd,
    #[serde(rename = "AWD")]
    Awd,
    #[serde(rename = "4WD")]
    FourWd,
}

impl FromStr for Drivetrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FWD" => Ok(Drivetrain::Fwd),
            "RWD" => Ok(Drivetrain::Rwd),
            "AWD" => Ok(Drivetrain::Awd),
            "4WD" | "4X4" => Ok(Drivetrain::FourWd),
            other => Err(format!("Tracción desconocida: '{}'", other)),
        }
    }
}

/// Vehicle normalizado - todos los campos están poblados
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: String,
    pub price: f64,
    pub mileage: f64,
    pub exterior_color: String,
    pub interior_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drivetrain: Option<Drivetrain>,
    pub fuel_type: String,
    pub transmission: String,
    pub engine: String,
    pub vin: String,
    pub stock_number: String,
    pub description: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub featured: bool,
    pub condition: VehicleCondition,
    pub body_type: String,
    #[serde(rename = "cityMPG", default, skip_serializing_if = "Option::is_none")]
    pub city_mpg: Option<u32>,
    #[serde(rename = "highwayMPG", default, skip_serializing_if = "Option::is_none")]
    pub highway_mpg: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Vehicle {
    /// Título corto para listados: "2020 Toyota Camry LE"
    pub fn title(&self) -> String {
        let mut title = format!("{} {} {}", self.year, self.make, self.model);
        if !self.trim.is_empty() {
            title.push(' ');
            title.push_str(&self.trim);
        }
        title
    }
}

/// Registro tal como llega de la API - cualquier campo puede faltar.
///
/// Un campo con tipo inesperado se trata como ausente; `id` y los números
/// también se aceptan como texto o número indistintamente.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVehicle {
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub make: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient_year")]
    pub year: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub trim: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub mileage: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub exterior_color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub interior_color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub drivetrain: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub fuel_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub transmission: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub engine: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub vin: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub stock_number: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub features: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub images: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub featured: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub condition: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub body_type: Option<String>,
    #[serde(rename = "cityMPG", deserialize_with = "lenient")]
    pub city_mpg: Option<u32>,
    #[serde(rename = "highwayMPG", deserialize_with = "lenient")]
    pub highway_mpg: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub updated_at: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = lenient_number(deserializer)?;
    Ok(year.filter(|y| y.is_finite()).map(|y| y.trunc() as i64))
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn amount_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

impl RawVehicle {
    /// Rellenar los campos ausentes con valores por defecto del tipo correcto.
    ///
    /// `now` fija el año por defecto y las marcas de tiempo ausentes.
    pub fn normalize(self, now: DateTime<Utc>) -> Vehicle {
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        let year = self
            .year
            .filter(|y| (1000..=9999).contains(y))
            .map(|y| y as i32)
            .unwrap_or_else(|| now.year());

        let images = self
            .images
            .filter(|imgs| !imgs.is_empty())
            .unwrap_or_else(|| vec![PLACEHOLDER_IMAGE.to_string()]);

        let condition = self
            .condition
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or_default();

        Vehicle {
            id: self.id.unwrap_or_default(),
            make: text_or(self.make, "Unknown"),
            model: text_or(self.model, "Unknown"),
            year,
            trim: self.trim.unwrap_or_default(),
            price: amount_or_zero(self.price),
            mileage: amount_or_zero(self.mileage),
            exterior_color: self.exterior_color.unwrap_or_default(),
            interior_color: self.interior_color.unwrap_or_default(),
            drivetrain: self.drivetrain.as_deref().and_then(|d| d.parse().ok()),
            fuel_type: text_or(self.fuel_type, "Petrol"),
            transmission: text_or(self.transmission, "Automatic"),
            engine: self.engine.unwrap_or_default(),
            vin: self.vin.unwrap_or_default(),
            stock_number: self.stock_number.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            features: self.features.unwrap_or_default(),
            images,
            featured: self.featured.unwrap_or(false),
            condition,
            body_type: text_or(self.body_type, "Sedan"),
            city_mpg: self.city_mpg,
            highway_mpg: self.highway_mpg,
            created_at: Some(text_or(self.created_at, &timestamp)),
            updated_at: Some(text_or(self.updated_at, &timestamp)),
        }
    }
}

impl From<RawVehicle> for Vehicle {
    fn from(raw: RawVehicle) -> Self {
        raw.normalize(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let vehicle = RawVehicle::default().normalize(fixed_now());

        assert_eq!(vehicle.make, "Unknown");
        assert_eq!(vehicle.model, "Unknown");
        assert_eq!(vehicle.year, 2024);
        assert_eq!(vehicle.price, 0.0);
        assert_eq!(vehicle.mileage, 0.0);
        assert!(!vehicle.featured);
        assert_eq!(vehicle.condition, VehicleCondition::NigerianUsed);
        assert_eq!(vehicle.body_type, "Sedan");
        assert_eq!(vehicle.fuel_type, "Petrol");
        assert_eq!(vehicle.transmission, "Automatic");
        assert!(vehicle.features.is_empty());
        assert_eq!(vehicle.images, vec![PLACEHOLDER_IMAGE.to_string()]);
        assert_eq!(vehicle.created_at.as_deref(), Some("2024-06-01T12:00:00.000Z"));
    }

    #[test]
    fn test_normalize_keeps_provided_values() {
        let raw: RawVehicle = serde_json::from_value(serde_json::json!({
            "id": "v1",
            "make": "Toyota",
            "model": "Camry",
            "year": 2020,
            "price": 15000,
            "mileage": 42000,
            "condition": "Foreign Used",
            "drivetrain": "AWD",
            "images": ["/camry.jpg"],
            "featured": true,
            "createdAt": "2024-01-02T00:00:00.000Z"
        }))
        .unwrap();

        let vehicle = raw.normalize(fixed_now());
        assert_eq!(vehicle.id, "v1");
        assert_eq!(vehicle.year, 2020);
        assert_eq!(vehicle.price, 15000.0);
        assert_eq!(vehicle.condition, VehicleCondition::ForeignUsed);
        assert_eq!(vehicle.drivetrain, Some(Drivetrain::Awd));
        assert_eq!(vehicle.images, vec!["/camry.jpg".to_string()]);
        assert!(vehicle.featured);
        assert_eq!(vehicle.created_at.as_deref(), Some("2024-01-02T00:00:00.000Z"));
    }

    #[test]
    fn test_normalize_repairs_invalid_values() {
        let raw = RawVehicle {
            make: Some(String::new()),
            year: Some(99),
            price: Some(-10.0),
            images: Some(vec![]),
            condition: Some("salvage".to_string()),
            ..Default::default()
        };

        let vehicle = raw.normalize(fixed_now());
        assert_eq!(vehicle.make, "Unknown");
        assert_eq!(vehicle.year, 2024);
        assert_eq!(vehicle.price, 0.0);
        assert_eq!(vehicle.images, vec![PLACEHOLDER_IMAGE.to_string()]);
        assert_eq!(vehicle.condition, VehicleCondition::NigerianUsed);
    }

    #[test]
    fn test_vehicle_wire_format() {
        let vehicle = RawVehicle {
            id: Some("v9".to_string()),
            drivetrain: Some("4WD".to_string()),
            city_mpg: Some(25),
            ..Default::default()
        }
        .normalize(fixed_now());

        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["condition"], "Nigerian Used");
        assert_eq!(json["drivetrain"], "4WD");
        assert_eq!(json["cityMPG"], 25);
        assert_eq!(json["stockNumber"], "");
        assert!(json.get("highwayMPG").is_none());
    }

    #[test]
    fn test_title_skips_empty_trim() {
        let mut vehicle = RawVehicle {
            make: Some("Honda".to_string()),
            model: Some("Civic".to_string()),
            year: Some(2019),
            ..Default::default()
        }
        .normalize(fixed_now());
        assert_eq!(vehicle.title(), "2019 Honda Civic");

        vehicle.trim = "EX".to_string();
        assert_eq!(vehicle.title(), "2019 Honda Civic EX");
    }

    #[test]
    fn test_wrong_typed_fields_are_coerced_or_dropped() {
        let raw: RawVehicle = serde_json::from_value(serde_json::json!({
            "id": 42,
            "make": "Kia",
            "model": 7,
            "year": "2018",
            "price": "9500.50",
            "mileage": 2021.7,
            "images": "not-a-list",
            "featured": "yes"
        }))
        .unwrap();

        let vehicle = raw.normalize(fixed_now());
        assert_eq!(vehicle.id, "42");
        assert_eq!(vehicle.make, "Kia");
        assert_eq!(vehicle.model, "Unknown");
        assert_eq!(vehicle.year, 2018);
        assert_eq!(vehicle.price, 9500.5);
        assert_eq!(vehicle.mileage, 2021.7);
        assert_eq!(vehicle.images, vec![PLACEHOLDER_IMAGE.to_string()]);
        assert!(!vehicle.featured);

        let raw: RawVehicle = serde_json::from_value(serde_json::json!({ "year": 2020.9, "price": null })).unwrap();
        assert_eq!(raw.year, Some(2020));
        assert_eq!(raw.price, None);
    }
}
