//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula las queries sqlx de un recurso y traduce
//! las violaciones de constraints a la taxonomía de errores.

pub mod driver_repository;
pub mod fleet_repository;
pub mod invoice_repository;
pub mod shipment_repository;
pub mod vehicle_repository;
