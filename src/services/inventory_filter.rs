//! Motor de filtrado y ordenación del inventario
//!
//! Función pura sobre (lista completa, criterios) -> lista visible ordenada.
//! Nunca modifica la lista de origen.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::models::vehicle::Vehicle;

/// Rango de precios antes de cargar datos
pub const INITIAL_PRICE_RANGE: RangeInclusive<f64> = 0.0..=100_000.0;

/// Rango de años antes de cargar datos
pub const INITIAL_YEAR_RANGE: RangeInclusive<i32> = 2010..=2024;

/// Criterio de ordenación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
}

impl SortOption {
    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest First",
            SortOption::Oldest => "Oldest First",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
        }
    }

    fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match self {
            SortOption::Newest => b.year.cmp(&a.year),
            SortOption::Oldest => a.year.cmp(&b.year),
            SortOption::PriceLow => a.price.total_cmp(&b.price),
            SortOption::PriceHigh => b.price.total_cmp(&a.price),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
        };
        f.write_str(key)
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOption::Newest),
            "oldest" => Ok(SortOption::Oldest),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            other => Err(format!("Criterio de orden desconocido: '{}'", other)),
        }
    }
}

/// Criterios elegidos por el usuario
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub price_range: RangeInclusive<f64>,
    pub year_range: RangeInclusive<i32>,
    pub makes: BTreeSet<String>,
    pub sort: SortOption,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            price_range: INITIAL_PRICE_RANGE,
            year_range: INITIAL_YEAR_RANGE,
            makes: BTreeSet::new(),
            sort: SortOption::Newest,
        }
    }
}

impl FilterCriteria {
    /// Criterios iniciales con rangos derivados de los datos cargados
    pub fn for_data(vehicles: &[Vehicle]) -> Self {
        let mut criteria = Self::default();
        criteria.fit_ranges_to(vehicles);
        criteria
    }

    /// Ajustar rangos al min/max de los datos; sin datos no cambia nada
    pub fn fit_ranges_to(&mut self, vehicles: &[Vehicle]) {
        if let Some(prices) = price_bounds(vehicles) {
            self.price_range = prices;
        }
        if let Some(years) = year_bounds(vehicles) {
            self.year_range = years;
        }
    }
}

fn matches_search(vehicle: &Vehicle, query: &str) -> bool {
    query.is_empty()
        || vehicle.make.to_lowercase().contains(query)
        || vehicle.model.to_lowercase().contains(query)
        || vehicle.trim.to_lowercase().contains(query)
        || vehicle.year.to_string().contains(query)
}

/// Derivar la lista visible y ordenada
pub fn filter_vehicles(vehicles: &[Vehicle], criteria: &FilterCriteria) -> Vec<Vehicle> {
    if vehicles.is_empty() {
        return Vec::new();
    }

    let query = criteria.search.trim().to_lowercase();

    let mut results: Vec<Vehicle> = vehicles
        .iter()
        .filter(|v| matches_search(v, &query))
        .filter(|v| criteria.price_range.contains(&v.price))
        .filter(|v| criteria.year_range.contains(&v.year))
        .filter(|v| criteria.makes.is_empty() || criteria.makes.contains(&v.make))
        .cloned()
        .collect();

    // sort_by es estable
    results.sort_by(|a, b| criteria.sort.compare(a, b));
    results
}

/// Rango [min, max] de precios presentes
pub fn price_bounds(vehicles: &[Vehicle]) -> Option<RangeInclusive<f64>> {
    let mut prices = vehicles.iter().map(|v| v.price);
    let first = prices.next()?;
    let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    Some(min..=max)
}

/// Rango [min, max] de años presentes
pub fn year_bounds(vehicles: &[Vehicle]) -> Option<RangeInclusive<i32>> {
    let min = vehicles.iter().map(|v| v.year).min()?;
    let max = vehicles.iter().map(|v| v.year).max()?;
    Some(min..=max)
}

/// Marcas distintas, en orden alfabético
pub fn available_makes(vehicles: &[Vehicle]) -> Vec<String> {
    vehicles
        .iter()
        .map(|v| v.make.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
