use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::vehicle_dto::{VehicleListParams, VehiclePage};
use crate::models::vehicle::{RawVehicle, Vehicle};
use crate::services::vehicle_source::VehicleSource;
use crate::utils::errors::{AppError, AppResult};

// Fila de la tabla vehicles con features/imágenes agregadas
#[derive(Debug, sqlx::FromRow)]
pub struct VehicleRow {
    pub id: String,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: Option<String>,
    pub price: Decimal,
    pub mileage: Decimal,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub drivetrain: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub engine: Option<String>,
    pub stock_number: Option<String>,
    pub description: Option<String>,
    pub featured: bool,
    pub condition: Option<String>,
    pub body_type: Option<String>,
    pub city_mpg: Option<i32>,
    pub highway_mpg: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub features: Vec<String>,
    pub images: Vec<String>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        RawVehicle {
            id: Some(row.id),
            make: Some(row.make),
            model: Some(row.model),
            year: Some(i64::from(row.year)),
            trim: row.trim,
            price: row.price.to_f64(),
            mileage: row.mileage.to_f64(),
            exterior_color: row.exterior_color,
            interior_color: row.interior_color,
            drivetrain: row.drivetrain,
            fuel_type: row.fuel_type,
            transmission: row.transmission,
            engine: row.engine,
            vin: Some(row.vin),
            stock_number: row.stock_number,
            description: row.description,
            features: Some(row.features),
            images: Some(row.images),
            featured: Some(row.featured),
            condition: row.condition,
            body_type: row.body_type,
            city_mpg: row.city_mpg.and_then(|v| u32::try_from(v).ok()),
            highway_mpg: row.highway_mpg.and_then(|v| u32::try_from(v).ok()),
            created_at: Some(row.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            updated_at: Some(row.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
        .into()
    }
}

const SELECT_VEHICLE: &str = r#"
    SELECT v.id, v.vin, v.make, v.model, v.year, v.trim, v.price, v.mileage,
           v.exterior_color, v.interior_color, v.drivetrain, v.fuel_type,
           v.transmission, v.engine, v.stock_number, v.description, v.featured,
           v.condition, v.body_type, v.city_mpg, v.highway_mpg,
           v.created_at, v.updated_at,
           COALESCE((SELECT array_agg(f.name ORDER BY f.position)
                     FROM vehicle_features f WHERE f.vehicle_id = v.id), '{}') AS features,
           COALESCE((SELECT array_agg(i.url ORDER BY i.position)
                     FROM vehicle_images i WHERE i.vehicle_id = v.id), '{}') AS images
    FROM vehicles v
"#;

const SEARCH_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR v.make ILIKE $1 OR v.model ILIKE $1 OR v.vin ILIKE $1)
      AND ($2::numeric IS NULL OR v.price >= $2)
      AND ($3::numeric IS NULL OR v.price <= $3)
"#;

// Patrón ILIKE "contiene", escapando comodines del usuario
pub fn contains_pattern(search: &str) -> Option<String> {
    if search.is_empty() {
        return None;
    }
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}

fn price_bound(value: Option<f64>) -> AppResult<Option<Decimal>> {
    value
        .map(|v| {
            Decimal::from_f64_retain(v)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid price value: {}", v)))
        })
        .transpose()
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_page(&self, params: &VehicleListParams) -> AppResult<VehiclePage> {
        let pattern = contains_pattern(&params.search);
        let min_price = price_bound(params.min_price)?;
        let max_price = price_bound(params.max_price)?;

        let list_sql = format!(
            "{} {} ORDER BY v.created_at DESC LIMIT $4 OFFSET $5",
            SELECT_VEHICLE, SEARCH_FILTER
        );
        let count_sql = format!("SELECT COUNT(*) FROM vehicles v {}", SEARCH_FILTER);

        let rows = sqlx::query_as::<_, VehicleRow>(&list_sql)
            .bind(pattern.clone())
            .bind(min_price)
            .bind(max_price)
            .bind(i64::from(params.page_size))
            .bind(params.offset())
            .fetch_all(&self.pool);

        let count = sqlx::query_as::<_, (i64,)>(&count_sql)
            .bind(pattern)
            .bind(min_price)
            .bind(max_price)
            .fetch_one(&self.pool);

        let (rows, (total_items,)) = futures::try_join!(rows, count)?;

        Ok(VehiclePage {
            vehicles: rows.into_iter().map(Vehicle::from).collect(),
            total_items,
        })
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let sql = format!("{} WHERE v.id = $1", SELECT_VEHICLE);
        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Vehicle::from))
    }
}

#[async_trait]
impl VehicleSource for VehicleRepository {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn list(&self, params: &VehicleListParams) -> AppResult<VehiclePage> {
        self.find_page(params).await
    }

    async fn find(&self, id: &str) -> AppResult<Option<Vehicle>> {
        self.find_by_id(id).await
    }
}
