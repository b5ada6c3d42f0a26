//! DTOs de Fleet
//!
//! Los totales de vehículos/conductores del detalle se recalculan como
//! agregados sobre las asignaciones activas, no se leen de contadores
//! almacenados.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::fleet::{
    Fleet, FleetDriverAssignment, FleetPerformanceMetrics, FleetStatus, FleetVehicleAssignment,
};
use crate::utils::validation::PHONE_RE;

/// Request para crear una flota
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFleetRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 300))]
    pub headquarters: Option<String>,

    #[validate(length(max = 200))]
    pub manager_name: Option<String>,

    #[validate(email)]
    pub manager_email: Option<String>,

    #[validate(regex(
        path = "PHONE_RE",
        message = "Phone number must be entered in the format: +999999999"
    ))]
    pub manager_phone: Option<String>,
}

/// Request para actualizar una flota (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFleetRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub status: Option<FleetStatus>,

    #[validate(length(max = 300))]
    pub headquarters: Option<String>,

    #[validate(length(max = 200))]
    pub manager_name: Option<String>,

    #[validate(email)]
    pub manager_email: Option<String>,

    #[validate(regex(
        path = "PHONE_RE",
        message = "Phone number must be entered in the format: +999999999"
    ))]
    pub manager_phone: Option<String>,
}

/// Filtros para búsqueda de flotas
#[derive(Debug, Default, Deserialize)]
pub struct FleetFilters {
    pub status: Option<FleetStatus>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request para asignar un vehículo a la flota.
/// El id es opcional en el body: si falta es un error de validación,
/// no un error de deserialización.
#[derive(Debug, Deserialize)]
pub struct AssignVehicleRequest {
    pub vehicle_id: Option<Uuid>,
}

/// Request para asignar un conductor a la flota
#[derive(Debug, Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: Option<Uuid>,
}

/// Response de flota para la API - detalle, con totales recalculados
#[derive(Debug, Serialize)]
pub struct FleetResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: FleetStatus,
    pub headquarters: Option<String>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub manager_phone: Option<String>,
    pub total_vehicles: i64,
    pub total_drivers: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FleetResponse {
    pub fn from_fleet(fleet: Fleet, total_vehicles: i64, total_drivers: i64) -> Self {
        Self {
            id: fleet.id,
            name: fleet.name,
            description: fleet.description,
            status: fleet.status,
            headquarters: fleet.headquarters,
            manager_name: fleet.manager_name,
            manager_email: fleet.manager_email,
            manager_phone: fleet.manager_phone,
            total_vehicles,
            total_drivers,
            created_at: fleet.created_at,
            updated_at: fleet.updated_at,
        }
    }
}

/// Response de flota para listados
#[derive(Debug, Serialize)]
pub struct FleetListResponse {
    pub id: Uuid,
    pub name: String,
    pub status: FleetStatus,
    pub manager_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Fleet> for FleetListResponse {
    fn from(fleet: Fleet) -> Self {
        Self {
            id: fleet.id,
            name: fleet.name,
            status: fleet.status,
            manager_name: fleet.manager_name,
            created_at: fleet.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleAssignmentResponse {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub vehicle_id: Uuid,
    pub assignment_date: NaiveDate,
    pub removal_date: Option<NaiveDate>,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct DriverAssignmentResponse {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub driver_id: Uuid,
    pub assignment_date: NaiveDate,
    pub removal_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl From<FleetVehicleAssignment> for VehicleAssignmentResponse {
    fn from(a: FleetVehicleAssignment) -> Self {
        Self {
            id: a.id,
            fleet_id: a.fleet_id,
            vehicle_id: a.vehicle_id,
            assignment_date: a.assignment_date,
            removal_date: a.removal_date,
            is_active: a.is_active,
        }
    }
}

impl From<FleetDriverAssignment> for DriverAssignmentResponse {
    fn from(a: FleetDriverAssignment) -> Self {
        Self {
            id: a.id,
            fleet_id: a.fleet_id,
            driver_id: a.driver_id,
            assignment_date: a.assignment_date,
            removal_date: a.removal_date,
            is_active: a.is_active,
        }
    }
}

/// Response de métricas de rendimiento, con el consumo medio derivado
#[derive(Debug, Serialize)]
pub struct FleetMetricsResponse {
    pub fleet_id: Uuid,
    pub total_trips: i32,
    pub total_km_traveled: Decimal,
    pub total_fuel_consumed: Decimal,
    pub total_revenue: Decimal,
    pub total_fuel_cost: Decimal,
    pub total_maintenance_cost: Decimal,
    pub total_violations: i32,
    pub total_accidents: i32,
    pub safety_rating: Decimal,
    pub average_utilization_rate: Decimal,
    pub on_time_delivery_rate: Decimal,
    pub avg_fuel_consumption: Decimal,
    pub last_updated: DateTime<Utc>,
}

impl From<FleetPerformanceMetrics> for FleetMetricsResponse {
    fn from(m: FleetPerformanceMetrics) -> Self {
        let avg_fuel_consumption = m.avg_fuel_consumption();
        Self {
            fleet_id: m.fleet_id,
            total_trips: m.total_trips,
            total_km_traveled: m.total_km_traveled,
            total_fuel_consumed: m.total_fuel_consumed,
            total_revenue: m.total_revenue,
            total_fuel_cost: m.total_fuel_cost,
            total_maintenance_cost: m.total_maintenance_cost,
            total_violations: m.total_violations,
            total_accidents: m.total_accidents,
            safety_rating: m.safety_rating,
            average_utilization_rate: m.average_utilization_rate,
            on_time_delivery_rate: m.on_time_delivery_rate,
            avg_fuel_consumption,
            last_updated: m.last_updated,
        }
    }
}
