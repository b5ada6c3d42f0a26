//! DTOs de Vehicle
//!
//! Requests de creación/actualización con validación, filtros de listado
//! y responses de detalle (con atributos derivados) y de listado.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{
    FuelType, MaintenanceType, Transmission, Vehicle, VehicleFuelLog, VehicleMaintenanceLog,
    VehicleStatus, VehicleType,
};

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,

    #[validate(length(min = 1, max = 50))]
    pub vin: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900))]
    pub year: Option<i32>,

    pub vehicle_type: Option<VehicleType>,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub capacity: Decimal,

    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub odometer_reading: Option<Decimal>,

    pub registration_date: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
}

/// Request para actualizar un vehículo existente (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub vin: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900))]
    pub year: Option<i32>,

    pub vehicle_type: Option<VehicleType>,
    pub color: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub capacity: Option<Decimal>,

    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub status: Option<VehicleStatus>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub odometer_reading: Option<Decimal>,

    /// Ausente conserva la asignación actual; null explícito desasigna
    #[serde(default, deserialize_with = "crate::dto::common_dto::double_option")]
    pub assigned_driver_id: Option<Option<Uuid>>,

    pub registration_date: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<VehicleStatus>,
    pub vehicle_type: Option<VehicleType>,
    pub fuel_type: Option<FuelType>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de vehículo para la API - detalle
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub license_plate: String,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub vehicle_type: VehicleType,
    pub color: Option<String>,
    pub capacity: Decimal,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub status: VehicleStatus,
    pub odometer_reading: Decimal,
    pub assigned_driver_id: Option<Uuid>,
    pub registration_date: Option<NaiveDate>,
    pub last_service_date: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
    // derivados, calculados en lectura
    pub is_available: bool,
    pub vehicle_age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response de vehículo para listados - subconjunto abreviado
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub id: Uuid,
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        let now = Utc::now();
        let is_available = vehicle.is_available();
        let vehicle_age = vehicle.vehicle_age(now);
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate,
            vin: vehicle.vin,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vehicle_type: vehicle.vehicle_type,
            color: vehicle.color,
            capacity: vehicle.capacity,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            status: vehicle.status,
            odometer_reading: vehicle.odometer_reading,
            assigned_driver_id: vehicle.assigned_driver_id,
            registration_date: vehicle.registration_date,
            last_service_date: vehicle.last_service_date,
            insurance_expiry: vehicle.insurance_expiry,
            is_available,
            vehicle_age,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

impl From<Vehicle> for VehicleListResponse {
    fn from(vehicle: Vehicle) -> Self {
        let is_available = vehicle.is_available();
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate,
            make: vehicle.make,
            model: vehicle.model,
            vehicle_type: vehicle.vehicle_type,
            status: vehicle.status,
            is_available,
            created_at: vehicle.created_at,
        }
    }
}

/// Request para registrar un log de mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceLogRequest {
    pub maintenance_type: MaintenanceType,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cost: Decimal,
    pub maintenance_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub performed_by: Option<String>,
}

/// Request para registrar un repostaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFuelLogRequest {
    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub fuel_amount: Decimal,
    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cost: Decimal,
    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub odometer_reading: Decimal,
    pub fuel_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceLogResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub cost: Decimal,
    pub maintenance_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    pub performed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct FuelLogResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub fuel_amount: Decimal,
    pub cost: Decimal,
    pub odometer_reading: Decimal,
    pub fuel_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<VehicleMaintenanceLog> for MaintenanceLogResponse {
    fn from(log: VehicleMaintenanceLog) -> Self {
        Self {
            id: log.id,
            vehicle_id: log.vehicle_id,
            maintenance_type: log.maintenance_type,
            description: log.description,
            cost: log.cost,
            maintenance_date: log.maintenance_date,
            next_service_date: log.next_service_date,
            performed_by: log.performed_by,
            created_at: log.created_at,
        }
    }
}

impl From<VehicleFuelLog> for FuelLogResponse {
    fn from(log: VehicleFuelLog) -> Self {
        Self {
            id: log.id,
            vehicle_id: log.vehicle_id,
            fuel_amount: log.fuel_amount,
            cost: log.cost,
            odometer_reading: log.odometer_reading,
            fuel_date: log.fuel_date,
            created_at: log.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_vehicle_request_rejects_negative_capacity() {
        let request = CreateVehicleRequest {
            license_plate: "1234-ABC".to_string(),
            vin: None,
            make: "Volvo".to_string(),
            model: "FH16".to_string(),
            year: Some(2022),
            vehicle_type: None,
            color: None,
            capacity: Decimal::new(-10, 0),
            fuel_type: None,
            transmission: None,
            odometer_reading: None,
            registration_date: None,
            last_service_date: None,
            insurance_expiry: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("capacity"));
    }

    #[test]
    fn test_update_vehicle_assigned_driver_null_unassigns() {
        let request: UpdateVehicleRequest =
            serde_json::from_str(r#"{"assigned_driver_id": null}"#).unwrap();
        assert_eq!(request.assigned_driver_id, Some(None));
    }

    #[test]
    fn test_update_vehicle_assigned_driver_absent_keeps_current() {
        let request: UpdateVehicleRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.assigned_driver_id, None);

        let id = Uuid::new_v4();
        let body = format!(r#"{{"assigned_driver_id": "{}"}}"#, id);
        let request: UpdateVehicleRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(request.assigned_driver_id, Some(Some(id)));
    }
}
