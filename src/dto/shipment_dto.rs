//! DTOs de Shipment
//!
//! Requests de creación/actualización, la operación de asignación de
//! vehículo+conductor, eventos de tracking y paradas de ruta.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::shipment::{
    DeliveryRoute, Shipment, ShipmentPriority, ShipmentStatus, ShipmentTracking, TrackingStatus,
};

/// Request para crear un shipment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShipmentRequest {
    #[validate(length(min = 1, max = 50))]
    pub shipment_id: String,

    pub priority: Option<ShipmentPriority>,

    #[validate(length(min = 1, max = 300))]
    pub origin: String,

    #[validate(length(min = 1, max = 300))]
    pub destination: String,

    pub origin_latitude: Option<Decimal>,
    pub origin_longitude: Option<Decimal>,
    pub destination_latitude: Option<Decimal>,
    pub destination_longitude: Option<Decimal>,

    #[validate(length(min = 1))]
    pub cargo_description: String,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cargo_weight: Decimal,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cargo_volume: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cargo_value: Option<Decimal>,

    pub special_handling: Option<String>,

    pub scheduled_pickup: DateTime<Utc>,
    pub scheduled_delivery: DateTime<Utc>,
}

/// Request para actualizar un shipment (parcial).
/// El estado puede fijarse a cualquier valor: la máquina de estados es
/// permisiva por diseño.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShipmentRequest {
    pub status: Option<ShipmentStatus>,
    pub priority: Option<ShipmentPriority>,

    #[validate(length(min = 1, max = 300))]
    pub origin: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub destination: Option<String>,

    pub origin_latitude: Option<Decimal>,
    pub origin_longitude: Option<Decimal>,
    pub destination_latitude: Option<Decimal>,
    pub destination_longitude: Option<Decimal>,

    pub cargo_description: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cargo_weight: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cargo_volume: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub cargo_value: Option<Decimal>,

    pub special_handling: Option<String>,

    pub scheduled_pickup: Option<DateTime<Utc>>,
    pub scheduled_delivery: Option<DateTime<Utc>>,
}

/// Filtros para búsqueda de shipments
#[derive(Debug, Default, Deserialize)]
pub struct ShipmentFilters {
    pub status: Option<ShipmentStatus>,
    pub priority: Option<ShipmentPriority>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request de asignación: ambos ids requeridos.
/// Opcionales en el body para que la ausencia sea un error de
/// validación (400), no de deserialización.
#[derive(Debug, Deserialize)]
pub struct AssignVehicleDriverRequest {
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

/// Response de shipment para la API - detalle
#[derive(Debug, Serialize)]
pub struct ShipmentResponse {
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
    // derivados, calculados en lectura
    pub is_on_time: bool,
    pub duration_hours: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response de shipment para listados - subconjunto abreviado
#[derive(Debug, Serialize)]
pub struct ShipmentListResponse {
    pub id: Uuid,
    pub shipment_id: String,
    pub status: ShipmentStatus,
    pub priority: ShipmentPriority,
    pub origin: String,
    pub destination: String,
    pub scheduled_delivery: DateTime<Utc>,
    pub created_date: NaiveDate,
}

impl From<Shipment> for ShipmentResponse {
    fn from(shipment: Shipment) -> Self {
        let now = Utc::now();
        let is_on_time = shipment.is_on_time(now);
        let duration_hours = shipment.duration_hours();
        Self {
            id: shipment.id,
            shipment_id: shipment.shipment_id,
            status: shipment.status,
            priority: shipment.priority,
            origin: shipment.origin,
            destination: shipment.destination,
            origin_latitude: shipment.origin_latitude,
            origin_longitude: shipment.origin_longitude,
            destination_latitude: shipment.destination_latitude,
            destination_longitude: shipment.destination_longitude,
            cargo_description: shipment.cargo_description,
            cargo_weight: shipment.cargo_weight,
            cargo_volume: shipment.cargo_volume,
            cargo_value: shipment.cargo_value,
            special_handling: shipment.special_handling,
            assigned_vehicle_id: shipment.assigned_vehicle_id,
            assigned_driver_id: shipment.assigned_driver_id,
            created_date: shipment.created_date,
            scheduled_pickup: shipment.scheduled_pickup,
            scheduled_delivery: shipment.scheduled_delivery,
            actual_pickup: shipment.actual_pickup,
            actual_delivery: shipment.actual_delivery,
            is_on_time,
            duration_hours,
            created_at: shipment.created_at,
            updated_at: shipment.updated_at,
        }
    }
}

impl From<Shipment> for ShipmentListResponse {
    fn from(shipment: Shipment) -> Self {
        Self {
            id: shipment.id,
            shipment_id: shipment.shipment_id,
            status: shipment.status,
            priority: shipment.priority,
            origin: shipment.origin,
            destination: shipment.destination,
            scheduled_delivery: shipment.scheduled_delivery,
            created_date: shipment.created_date,
        }
    }
}

/// Request para añadir un evento de tracking
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrackingEventRequest {
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub status: TrackingStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackingEventResponse {
    pub id: Uuid,
    pub shipment_id: Uuid,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub status: TrackingStatus,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<ShipmentTracking> for TrackingEventResponse {
    fn from(event: ShipmentTracking) -> Self {
        Self {
            id: event.id,
            shipment_id: event.shipment_id,
            latitude: event.latitude,
            longitude: event.longitude,
            status: event.status,
            notes: event.notes,
            timestamp: event.timestamp,
        }
    }
}

/// Request para añadir una parada de ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteStopRequest {
    #[validate(range(min = 1))]
    pub stop_number: i32,

    #[validate(length(min = 1, max = 300))]
    pub location: String,

    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub load_weight: Decimal,

    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct RouteStopResponse {
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

impl From<DeliveryRoute> for RouteStopResponse {
    fn from(stop: DeliveryRoute) -> Self {
        Self {
            id: stop.id,
            shipment_id: stop.shipment_id,
            stop_number: stop.stop_number,
            location: stop.location,
            latitude: stop.latitude,
            longitude: stop.longitude,
            scheduled_arrival: stop.scheduled_arrival,
            actual_arrival: stop.actual_arrival,
            load_weight: stop.load_weight,
            description: stop.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateShipmentRequest {
        CreateShipmentRequest {
            shipment_id: "SHP-2026-0001".to_string(),
            priority: None,
            origin: "Madrid".to_string(),
            destination: "Valencia".to_string(),
            origin_latitude: None,
            origin_longitude: None,
            destination_latitude: None,
            destination_longitude: None,
            cargo_description: "Palets de fruta".to_string(),
            cargo_weight: Decimal::new(120050, 2),
            cargo_volume: None,
            cargo_value: None,
            special_handling: None,
            scheduled_pickup: Utc::now(),
            scheduled_delivery: Utc::now(),
        }
    }

    #[test]
    fn test_create_shipment_request_valid() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_create_shipment_request_rejects_negative_cargo() {
        let mut request = base_request();
        request.cargo_weight = Decimal::new(-500, 2);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cargo_weight"));

        let mut request = base_request();
        request.cargo_value = Some(Decimal::new(-1, 0));
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cargo_value"));
    }
}
