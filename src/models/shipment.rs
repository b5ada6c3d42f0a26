//! Modelo de Shipment
//!
//! Contiene el struct Shipment, su máquina de estados (deliberadamente
//! permisiva: cualquier estado puede fijarse por update directo, solo
//! tres transiciones tienen operación dedicada), los eventos de tracking
//! append-only y las paradas de ruta.
//!
//! El vocabulario de estados de tracking es independiente del estado del
//! shipment y ningún mecanismo los reconcilia.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del shipment - mapea al ENUM shipment_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "shipment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
    OnHold,
}

impl ShipmentStatus {
    /// Máquina de estados permisiva: toda transición es legal.
    /// El match es exhaustivo para que un nuevo estado obligue a
    /// revisar esta decisión.
    pub fn can_transition_to(self, _next: ShipmentStatus) -> bool {
        match self {
            ShipmentStatus::Pending
            | ShipmentStatus::Assigned
            | ShipmentStatus::InTransit
            | ShipmentStatus::Delivered
            | ShipmentStatus::Cancelled
            | ShipmentStatus::OnHold => true,
        }
    }
}

/// Prioridad del shipment - mapea al ENUM shipment_priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "shipment_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShipmentPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Estado de un evento de tracking - vocabulario propio, no el del shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tracking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    PendingPickup,
    PickedUp,
    InTransit,
    InTransitStop,
    OutForDelivery,
    Delivered,
    FailedDelivery,
}

/// Shipment principal - mapea a la tabla shipments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shipment {
    pub id: Uuid,
    pub shipment_id: String,
    pub status: ShipmentStatus,
    pub priority: ShipmentPriority,
    pub origin: String,
    pub destination: String,
    pub origin_latitude: Option<Decimal>,
    pub origin_longitude: Option<Decimal>,
    pub destination_latitude: Option<Decimal>,
    pub destination_longitude: Option<Decimal>,
    pub cargo_description: String,
    pub cargo_weight: Decimal,
    pub cargo_volume: Option<Decimal>,
    pub cargo_value: Option<Decimal>,
    pub special_handling: Option<String>,
    pub assigned_vehicle_id: Option<Uuid>,
    pub assigned_driver_id: Option<Uuid>,
    pub created_date: NaiveDate,
    pub scheduled_pickup: DateTime<Utc>,
    pub scheduled_delivery: DateTime<Utc>,
    pub actual_pickup: Option<DateTime<Utc>>,
    pub actual_delivery: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    /// Entregado: en plazo si la entrega real no superó la programada.
    /// Sin entrega real: en plazo mientras no haya vencido la programada.
    pub fn is_on_time(&self, now: DateTime<Utc>) -> bool {
        match self.actual_delivery {
            Some(actual) => actual <= self.scheduled_delivery,
            None => now <= self.scheduled_delivery,
        }
    }

    /// Duración en horas entre recogida y entrega reales
    pub fn duration_hours(&self) -> Option<f64> {
        let pickup = self.actual_pickup?;
        let delivery = self.actual_delivery?;
        Some((delivery - pickup).num_seconds() as f64 / 3600.0)
    }
}

/// Evento de tracking append-only
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShipmentTracking {
    pub id: Uuid,
    pub shipment_id: Uuid,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub status: TrackingStatus,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Parada de una ruta de entrega multi-stop, ordenada por stop_number
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeliveryRoute {
    pub id: Uuid,
    pub shipment_id: Uuid,
    pub stop_number: i32,
    pub location: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub load_weight: Decimal,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn shipment_fixture() -> Shipment {
        let scheduled_pickup = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        Shipment {
            id: Uuid::new_v4(),
            shipment_id: "SHP-0001".to_string(),
            status: ShipmentStatus::Pending,
            priority: ShipmentPriority::Medium,
            origin: "Madrid".to_string(),
            destination: "Valencia".to_string(),
            origin_latitude: None,
            origin_longitude: None,
            destination_latitude: None,
            destination_longitude: None,
            cargo_description: "Palets de fruta".to_string(),
            cargo_weight: Decimal::new(120000, 2),
            cargo_volume: None,
            cargo_value: None,
            special_handling: None,
            assigned_vehicle_id: None,
            assigned_driver_id: None,
            created_date: scheduled_pickup.date_naive(),
            scheduled_pickup,
            scheduled_delivery: scheduled_pickup + Duration::hours(10),
            actual_pickup: None,
            actual_delivery: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_on_time_after_delivery_ignores_current_time() {
        let mut shipment = shipment_fixture();
        shipment.actual_delivery = Some(shipment.scheduled_delivery - Duration::hours(1));

        // mucho después de la fecha programada, sigue siendo puntual
        let far_future = shipment.scheduled_delivery + Duration::days(365);
        assert!(shipment.is_on_time(far_future));

        shipment.actual_delivery = Some(shipment.scheduled_delivery + Duration::minutes(1));
        assert!(!shipment.is_on_time(far_future));
    }

    #[test]
    fn test_on_time_before_delivery_depends_on_now() {
        let shipment = shipment_fixture();
        assert!(shipment.is_on_time(shipment.scheduled_delivery - Duration::hours(1)));
        assert!(shipment.is_on_time(shipment.scheduled_delivery));
        assert!(!shipment.is_on_time(shipment.scheduled_delivery + Duration::seconds(1)));
    }

    #[test]
    fn test_duration_hours() {
        let mut shipment = shipment_fixture();
        assert_eq!(shipment.duration_hours(), None);

        shipment.actual_pickup = Some(shipment.scheduled_pickup);
        assert_eq!(shipment.duration_hours(), None);

        shipment.actual_delivery = Some(shipment.scheduled_pickup + Duration::minutes(90));
        assert_eq!(shipment.duration_hours(), Some(1.5));
    }

    #[test]
    fn test_all_status_transitions_are_legal() {
        let all = [
            ShipmentStatus::Pending,
            ShipmentStatus::Assigned,
            ShipmentStatus::InTransit,
            ShipmentStatus::Delivered,
            ShipmentStatus::Cancelled,
            ShipmentStatus::OnHold,
        ];
        for from in all {
            for to in all {
                assert!(from.can_transition_to(to));
            }
        }
    }
}
