pub mod contact_controller;
pub mod vehicle_controller;
