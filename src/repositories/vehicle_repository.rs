use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::vehicle_dto::{
    CreateFuelLogRequest, CreateMaintenanceLogRequest, CreateVehicleRequest, UpdateVehicleRequest,
    VehicleFilters,
};
use crate::models::vehicle::{
    FuelType, Transmission, Vehicle, VehicleFuelLog, VehicleMaintenanceLog, VehicleStatus,
    VehicleType,
};
use crate::utils::errors::{map_constraint_error, AppError};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, license_plate, vin, make, model, year, vehicle_type, color,
                capacity, fuel_type, transmission, status, odometer_reading,
                registration_date, last_service_date, insurance_expiry,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $17)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.license_plate)
        .bind(request.vin)
        .bind(request.make)
        .bind(request.model)
        .bind(request.year)
        .bind(request.vehicle_type.unwrap_or(VehicleType::Truck))
        .bind(request.color)
        .bind(request.capacity)
        .bind(request.fuel_type.unwrap_or(FuelType::Diesel))
        .bind(request.transmission.unwrap_or(Transmission::Automatic))
        .bind(VehicleStatus::Active)
        .bind(request.odometer_reading.unwrap_or_default())
        .bind(request.registration_date)
        .bind(request.last_service_date)
        .bind(request.insurance_expiry)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Vehicle"))?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM vehicles WHERE 1=1");

        if let Some(status) = filters.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(vehicle_type) = filters.vehicle_type {
            qb.push(" AND vehicle_type = ").push_bind(vehicle_type);
        }
        if let Some(fuel_type) = filters.fuel_type {
            qb.push(" AND fuel_type = ").push_bind(fuel_type);
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (license_plate ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR make ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR model ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR vin ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        // columnas de ordenación permitidas; descendente con prefijo '-'
        let order = match filters.ordering.as_deref() {
            Some("license_plate") => "license_plate ASC",
            Some("-license_plate") => "license_plate DESC",
            Some("capacity") => "capacity ASC",
            Some("-capacity") => "capacity DESC",
            Some("created_at") => "created_at ASC",
            _ => "created_at DESC",
        };
        qb.push(" ORDER BY ").push(order);

        qb.push(" LIMIT ").push_bind(filters.limit.unwrap_or(100));
        qb.push(" OFFSET ").push_bind(filters.offset.unwrap_or(0));

        let vehicles = qb.build_query_as::<Vehicle>().fetch_all(&self.pool).await?;

        Ok(vehicles)
    }

    /// Vehículos disponibles: activos y sin conductor asignado
    pub async fn list_available(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE status = $1 AND assigned_driver_id IS NULL ORDER BY created_at DESC",
        )
        .bind(VehicleStatus::Active)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET license_plate = $2, vin = $3, make = $4, model = $5, year = $6,
                vehicle_type = $7, color = $8, capacity = $9, fuel_type = $10,
                transmission = $11, status = $12, odometer_reading = $13,
                assigned_driver_id = $14, registration_date = $15,
                last_service_date = $16, insurance_expiry = $17, updated_at = $18
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.license_plate.unwrap_or(current.license_plate))
        .bind(request.vin.or(current.vin))
        .bind(request.make.unwrap_or(current.make))
        .bind(request.model.unwrap_or(current.model))
        .bind(request.year.or(current.year))
        .bind(request.vehicle_type.unwrap_or(current.vehicle_type))
        .bind(request.color.or(current.color))
        .bind(request.capacity.unwrap_or(current.capacity))
        .bind(request.fuel_type.unwrap_or(current.fuel_type))
        .bind(request.transmission.unwrap_or(current.transmission))
        .bind(request.status.unwrap_or(current.status))
        .bind(request.odometer_reading.unwrap_or(current.odometer_reading))
        // doble Option: ausente conserva, null explícito desasigna
        .bind(request.assigned_driver_id.unwrap_or(current.assigned_driver_id))
        .bind(request.registration_date.or(current.registration_date))
        .bind(request.last_service_date.or(current.last_service_date))
        .bind(request.insurance_expiry.or(current.insurance_expiry))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Vehicle"))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }

    pub async fn add_maintenance_log(
        &self,
        vehicle_id: Uuid,
        request: CreateMaintenanceLogRequest,
    ) -> Result<VehicleMaintenanceLog, AppError> {
        let log = sqlx::query_as::<_, VehicleMaintenanceLog>(
            r#"
            INSERT INTO vehicle_maintenance_logs (
                id, vehicle_id, maintenance_type, description, cost,
                maintenance_date, next_service_date, performed_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(request.maintenance_type)
        .bind(request.description)
        .bind(request.cost)
        .bind(request.maintenance_date)
        .bind(request.next_service_date)
        .bind(request.performed_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "VehicleMaintenanceLog"))?;

        Ok(log)
    }

    pub async fn maintenance_history(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<VehicleMaintenanceLog>, AppError> {
        let logs = sqlx::query_as::<_, VehicleMaintenanceLog>(
            "SELECT * FROM vehicle_maintenance_logs WHERE vehicle_id = $1 ORDER BY maintenance_date DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn add_fuel_log(
        &self,
        vehicle_id: Uuid,
        request: CreateFuelLogRequest,
    ) -> Result<VehicleFuelLog, AppError> {
        let log = sqlx::query_as::<_, VehicleFuelLog>(
            r#"
            INSERT INTO vehicle_fuel_logs (
                id, vehicle_id, fuel_amount, cost, odometer_reading, fuel_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(request.fuel_amount)
        .bind(request.cost)
        .bind(request.odometer_reading)
        .bind(request.fuel_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "VehicleFuelLog"))?;

        Ok(log)
    }

    pub async fn fuel_history(&self, vehicle_id: Uuid) -> Result<Vec<VehicleFuelLog>, AppError> {
        let logs = sqlx::query_as::<_, VehicleFuelLog>(
            "SELECT * FROM vehicle_fuel_logs WHERE vehicle_id = $1 ORDER BY fuel_date DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
