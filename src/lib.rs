//! Dealership vehicle catalog
//!
//! API HTTP del catálogo (proveedor externo o PostgreSQL), cliente del
//! catálogo con normalización de registros, motor de filtrado del
//! inventario y debounce del buscador.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use client::{CatalogClient, CatalogError};
pub use models::vehicle::{Vehicle, VehicleCondition};
pub use routes::create_app;
pub use services::inventory_filter::{filter_vehicles, FilterCriteria, SortOption};
pub use services::inventory_view::{InventoryPage, InventoryView, LoadState};
pub use state::AppState;
pub use utils::debounce::Debouncer;
