//! DTOs de la API
//!
//! Sobre de respuesta común y parámetros de consulta de los endpoints.

pub mod api_response;
pub mod vehicle_dto;

pub use api_response::{ApiResponse, Pagination};
