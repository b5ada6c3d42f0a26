//! Modelo de Fleet
//!
//! Agrupación de vehículos y conductores, con sus registros de asignación
//! y el registro de métricas de rendimiento (1:1 con la flota).
//! Los totales de vehículos/conductores NO se almacenan: se recalculan
//! como agregados sobre las filas de asignación activas en lectura.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de la flota - mapea al ENUM fleet_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fleet_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FleetStatus {
    Active,
    Inactive,
    Archived,
}

/// Fleet principal - mapea a la tabla fleets
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fleet {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: FleetStatus,
    pub headquarters: Option<String>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub manager_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registro de asignación vehículo-flota.
/// La unicidad es sobre el par (fleet, vehicle), activo o no.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FleetVehicleAssignment {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub vehicle_id: Uuid,
    pub assignment_date: NaiveDate,
    pub removal_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// Registro de asignación conductor-flota
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FleetDriverAssignment {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub driver_id: Uuid,
    pub assignment_date: NaiveDate,
    pub removal_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// Métricas de rendimiento de la flota.
/// Contadores monotónicos actualizados por escritura directa, nunca
/// recalculados desde los logs subyacentes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FleetPerformanceMetrics {
    pub id: Uuid,
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
    pub last_updated: DateTime<Utc>,
}

impl FleetPerformanceMetrics {
    /// Consumo medio (L/km). Con denominador cero devuelve cero,
    /// nunca un error de división.
    pub fn avg_fuel_consumption(&self) -> Decimal {
        if self.total_km_traveled > Decimal::ZERO {
            self.total_fuel_consumed / self.total_km_traveled
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics_fixture() -> FleetPerformanceMetrics {
        FleetPerformanceMetrics {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            total_trips: 0,
            total_km_traveled: Decimal::ZERO,
            total_fuel_consumed: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
            total_fuel_cost: Decimal::ZERO,
            total_maintenance_cost: Decimal::ZERO,
            total_violations: 0,
            total_accidents: 0,
            safety_rating: Decimal::new(5, 0),
            average_utilization_rate: Decimal::ZERO,
            on_time_delivery_rate: Decimal::new(100, 0),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_avg_fuel_consumption_with_zero_km_is_zero() {
        let mut metrics = metrics_fixture();
        metrics.total_fuel_consumed = Decimal::new(50, 0);
        metrics.total_km_traveled = Decimal::ZERO;
        assert_eq!(metrics.avg_fuel_consumption(), Decimal::ZERO);
    }

    #[test]
    fn test_avg_fuel_consumption() {
        let mut metrics = metrics_fixture();
        metrics.total_fuel_consumed = Decimal::new(50, 0);
        metrics.total_km_traveled = Decimal::new(500, 0);
        assert_eq!(metrics.avg_fuel_consumption(), Decimal::new(1, 1)); // 0.1 L/km
    }
}
