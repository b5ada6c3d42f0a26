//! Controladores de la aplicación

pub mod driver_controller;
pub mod fleet_controller;
pub mod invoice_controller;
pub mod shipment_controller;
pub mod vehicle_controller;
