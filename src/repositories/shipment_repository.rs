//! Repositorio de Shipment
//!
//! Incluye las tres transiciones con operación dedicada (asignar,
//! iniciar tránsito, completar entrega), el historial de tracking
//! append-only y las paradas de ruta.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::shipment_dto::{
    CreateRouteStopRequest, CreateShipmentRequest, CreateTrackingEventRequest, ShipmentFilters,
    UpdateShipmentRequest,
};
use crate::models::shipment::{
    DeliveryRoute, Shipment, ShipmentPriority, ShipmentStatus, ShipmentTracking,
};
use crate::utils::errors::{map_constraint_error, AppError};

pub struct ShipmentRepository {
    pool: PgPool,
}

impl ShipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateShipmentRequest) -> Result<Shipment, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            INSERT INTO shipments (
                id, shipment_id, status, priority, origin, destination,
                origin_latitude, origin_longitude, destination_latitude,
                destination_longitude, cargo_description, cargo_weight,
                cargo_volume, cargo_value, special_handling, created_date,
                scheduled_pickup, scheduled_delivery, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, CURRENT_DATE, $16, $17, $18, $18)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.shipment_id)
        .bind(ShipmentStatus::Pending)
        .bind(request.priority.unwrap_or(ShipmentPriority::Medium))
        .bind(request.origin)
        .bind(request.destination)
        .bind(request.origin_latitude)
        .bind(request.origin_longitude)
        .bind(request.destination_latitude)
        .bind(request.destination_longitude)
        .bind(request.cargo_description)
        .bind(request.cargo_weight)
        .bind(request.cargo_volume)
        .bind(request.cargo_value)
        .bind(request.special_handling)
        .bind(request.scheduled_pickup)
        .bind(request.scheduled_delivery)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Shipment"))?;

        Ok(shipment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Shipment>, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(shipment)
    }

    pub async fn list(&self, filters: &ShipmentFilters) -> Result<Vec<Shipment>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM shipments WHERE 1=1");

        if let Some(status) = filters.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(priority) = filters.priority {
            qb.push(" AND priority = ").push_bind(priority);
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (shipment_id ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR origin ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR destination ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        let order = match filters.ordering.as_deref() {
            Some("created_date") => "created_date ASC",
            Some("scheduled_delivery") => "scheduled_delivery ASC",
            Some("-scheduled_delivery") => "scheduled_delivery DESC",
            Some("priority") => "priority ASC",
            Some("-priority") => "priority DESC",
            _ => "created_date DESC",
        };
        qb.push(" ORDER BY ").push(order);

        qb.push(" LIMIT ").push_bind(filters.limit.unwrap_or(100));
        qb.push(" OFFSET ").push_bind(filters.offset.unwrap_or(0));

        let shipments = qb.build_query_as::<Shipment>().fetch_all(&self.pool).await?;

        Ok(shipments)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateShipmentRequest,
    ) -> Result<Shipment, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

        if let Some(next) = request.status {
            if !current.status.can_transition_to(next) {
                return Err(AppError::Conflict(format!(
                    "shipment cannot move from {:?} to {:?}",
                    current.status, next
                )));
            }
        }

        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET status = $2, priority = $3, origin = $4, destination = $5,
                origin_latitude = $6, origin_longitude = $7,
                destination_latitude = $8, destination_longitude = $9,
                cargo_description = $10, cargo_weight = $11, cargo_volume = $12,
                cargo_value = $13, special_handling = $14,
                scheduled_pickup = $15, scheduled_delivery = $16, updated_at = $17
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.status.unwrap_or(current.status))
        .bind(request.priority.unwrap_or(current.priority))
        .bind(request.origin.unwrap_or(current.origin))
        .bind(request.destination.unwrap_or(current.destination))
        .bind(request.origin_latitude.or(current.origin_latitude))
        .bind(request.origin_longitude.or(current.origin_longitude))
        .bind(request.destination_latitude.or(current.destination_latitude))
        .bind(request.destination_longitude.or(current.destination_longitude))
        .bind(request.cargo_description.unwrap_or(current.cargo_description))
        .bind(request.cargo_weight.unwrap_or(current.cargo_weight))
        .bind(request.cargo_volume.or(current.cargo_volume))
        .bind(request.cargo_value.or(current.cargo_value))
        .bind(request.special_handling.or(current.special_handling))
        .bind(request.scheduled_pickup.unwrap_or(current.scheduled_pickup))
        .bind(request.scheduled_delivery.unwrap_or(current.scheduled_delivery))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Shipment"))?;

        Ok(shipment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM shipments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Shipment not found".to_string()));
        }

        Ok(())
    }

    /// Fijar vehículo y conductor y pasar a 'assigned'.
    /// Sin comprobación de disponibilidad: la disponibilidad es
    /// informativa, nunca una precondición.
    pub async fn assign_vehicle_driver(
        &self,
        id: Uuid,
        vehicle_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Shipment, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET assigned_vehicle_id = $2, assigned_driver_id = $3, status = $4,
                updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(ShipmentStatus::Assigned)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Shipment"))?
        .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

        Ok(shipment)
    }

    /// Pasar a 'in_transit' y sellar la recogida real.
    /// Se admite desde cualquier estado previo (máquina permisiva).
    pub async fn start_transit(&self, id: Uuid, now: DateTime<Utc>) -> Result<Shipment, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET status = $2, actual_pickup = $3, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ShipmentStatus::InTransit)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        // el envío puede borrarse entre la comprobación y el UPDATE
        .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

        Ok(shipment)
    }

    /// Pasar a 'delivered' y sellar la entrega real
    pub async fn complete_delivery(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Shipment, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET status = $2, actual_delivery = $3, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ShipmentStatus::Delivered)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

        Ok(shipment)
    }

    /// Añadir un evento de tracking. Solo INSERT: los eventos nunca se
    /// actualizan ni se borran individualmente.
    pub async fn add_tracking_event(
        &self,
        shipment_id: Uuid,
        request: CreateTrackingEventRequest,
    ) -> Result<ShipmentTracking, AppError> {
        let event = sqlx::query_as::<_, ShipmentTracking>(
            r#"
            INSERT INTO shipment_tracking (id, shipment_id, latitude, longitude, status, notes, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shipment_id)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.status)
        .bind(request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "ShipmentTracking"))?;

        Ok(event)
    }

    pub async fn tracking_history(
        &self,
        shipment_id: Uuid,
    ) -> Result<Vec<ShipmentTracking>, AppError> {
        let events = sqlx::query_as::<_, ShipmentTracking>(
            "SELECT * FROM shipment_tracking WHERE shipment_id = $1 ORDER BY timestamp DESC",
        )
        .bind(shipment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn add_route_stop(
        &self,
        shipment_id: Uuid,
        request: CreateRouteStopRequest,
    ) -> Result<DeliveryRoute, AppError> {
        let stop = sqlx::query_as::<_, DeliveryRoute>(
            r#"
            INSERT INTO delivery_routes (
                id, shipment_id, stop_number, location, latitude, longitude,
                scheduled_arrival, actual_arrival, load_weight, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shipment_id)
        .bind(request.stop_number)
        .bind(request.location)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.scheduled_arrival)
        .bind(request.actual_arrival)
        .bind(request.load_weight)
        .bind(request.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "DeliveryRoute"))?;

        Ok(stop)
    }

    pub async fn route_stops(&self, shipment_id: Uuid) -> Result<Vec<DeliveryRoute>, AppError> {
        let stops = sqlx::query_as::<_, DeliveryRoute>(
            "SELECT * FROM delivery_routes WHERE shipment_id = $1 ORDER BY stop_number ASC",
        )
        .bind(shipment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stops)
    }
}
