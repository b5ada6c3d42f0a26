//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, sus logs de mantenimiento y
//! combustible, y los atributos derivados de disponibilidad.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Maintenance,
    Retired,
}

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Truck,
    Van,
    Car,
    Motorcycle,
    Trailer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fuel_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transmission", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "maintenance_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    OilChange,
    TireRotation,
    BrakeService,
    Inspection,
    Repair,
    Other,
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Disponible para uso: activo y sin conductor asignado.
    /// Informativo - ninguna operación de asignación lo exige.
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Active && self.assigned_driver_id.is_none()
    }

    /// Antigüedad del vehículo en años según el año de fabricación
    pub fn vehicle_age(&self, now: DateTime<Utc>) -> Option<i32> {
        self.year.map(|y| now.year() - y)
    }
}

/// Log de mantenimiento de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleMaintenanceLog {
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

/// Log de repostaje de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleFuelLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub fuel_amount: Decimal,
    pub cost: Decimal,
    pub odometer_reading: Decimal,
    pub fuel_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn vehicle_fixture() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            license_plate: "1234-ABC".to_string(),
            vin: Some("VIN000111222333".to_string()),
            make: "Iveco".to_string(),
            model: "Daily".to_string(),
            year: Some(2020),
            vehicle_type: VehicleType::Van,
            color: None,
            capacity: Decimal::new(350000, 2),
            fuel_type: FuelType::Diesel,
            transmission: Transmission::Manual,
            status: VehicleStatus::Active,
            odometer_reading: Decimal::ZERO,
            assigned_driver_id: None,
            registration_date: None,
            last_service_date: None,
            insurance_expiry: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_active_unassigned_vehicle_is_available() {
        let vehicle = vehicle_fixture();
        assert!(vehicle.is_available());
    }

    #[test]
    fn test_assigned_vehicle_is_not_available() {
        let mut vehicle = vehicle_fixture();
        vehicle.assigned_driver_id = Some(Uuid::new_v4());
        assert!(!vehicle.is_available());
    }

    #[test]
    fn test_inactive_vehicle_is_not_available() {
        for status in [
            VehicleStatus::Inactive,
            VehicleStatus::Maintenance,
            VehicleStatus::Retired,
        ] {
            let mut vehicle = vehicle_fixture();
            vehicle.status = status;
            assert!(!vehicle.is_available());
        }
    }

    #[test]
    fn test_vehicle_age() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut vehicle = vehicle_fixture();
        assert_eq!(vehicle.vehicle_age(now), Some(5));

        vehicle.year = None;
        assert_eq!(vehicle.vehicle_age(now), None);
    }
}
