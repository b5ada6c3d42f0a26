//! Repositorio de Fleet
//!
//! La creación de la flota abre una transacción: la fila de métricas 1:1
//! se inserta junto con la flota o no se inserta nada.
//! Los totales de vehículos/conductores se recalculan como COUNT sobre
//! las asignaciones activas, nunca se almacenan.

use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::fleet_dto::{CreateFleetRequest, FleetFilters, UpdateFleetRequest};
use crate::models::fleet::{
    Fleet, FleetDriverAssignment, FleetPerformanceMetrics, FleetVehicleAssignment,
};
use crate::utils::errors::{map_constraint_error, AppError};

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateFleetRequest) -> Result<Fleet, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let fleet = sqlx::query_as::<_, Fleet>(
            r#"
            INSERT INTO fleets (
                id, name, description, status, headquarters, manager_name,
                manager_email, manager_phone, created_at, updated_at
            )
            VALUES ($1, $2, $3, 'active', $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.headquarters)
        .bind(request.manager_name)
        .bind(request.manager_email)
        .bind(request.manager_phone)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "Fleet"))?;

        sqlx::query(
            "INSERT INTO fleet_performance_metrics (id, fleet_id, last_updated) VALUES ($1, $2, $3)",
        )
        .bind(Uuid::new_v4())
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(fleet)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Fleet>, AppError> {
        let fleet = sqlx::query_as::<_, Fleet>("SELECT * FROM fleets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(fleet)
    }

    pub async fn list(&self, filters: &FleetFilters) -> Result<Vec<Fleet>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM fleets WHERE 1=1");

        if let Some(status) = filters.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR manager_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR headquarters ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        let order = match filters.ordering.as_deref() {
            Some("name") => "name ASC",
            Some("-name") => "name DESC",
            Some("created_at") => "created_at ASC",
            _ => "created_at DESC",
        };
        qb.push(" ORDER BY ").push(order);

        qb.push(" LIMIT ").push_bind(filters.limit.unwrap_or(100));
        qb.push(" OFFSET ").push_bind(filters.offset.unwrap_or(0));

        let fleets = qb.build_query_as::<Fleet>().fetch_all(&self.pool).await?;

        Ok(fleets)
    }

    pub async fn update(&self, id: Uuid, request: UpdateFleetRequest) -> Result<Fleet, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fleet not found".to_string()))?;

        let fleet = sqlx::query_as::<_, Fleet>(
            r#"
            UPDATE fleets
            SET name = $2, description = $3, status = $4, headquarters = $5,
                manager_name = $6, manager_email = $7, manager_phone = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.unwrap_or(current.name))
        .bind(request.description.or(current.description))
        .bind(request.status.unwrap_or(current.status))
        .bind(request.headquarters.or(current.headquarters))
        .bind(request.manager_name.or(current.manager_name))
        .bind(request.manager_email.or(current.manager_email))
        .bind(request.manager_phone.or(current.manager_phone))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Fleet"))?;

        Ok(fleet)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fleets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fleet not found".to_string()));
        }

        Ok(())
    }

    /// Crear la fila de asignación vehículo-flota. La unicidad del par
    /// (fleet, vehicle) la impone la base de datos: el duplicado llega
    /// aquí como Conflict, exista activo o no.
    pub async fn assign_vehicle(
        &self,
        fleet_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<FleetVehicleAssignment, AppError> {
        let assignment = sqlx::query_as::<_, FleetVehicleAssignment>(
            r#"
            INSERT INTO fleet_vehicle_assignments (id, fleet_id, vehicle_id, assignment_date, is_active)
            VALUES ($1, $2, $3, CURRENT_DATE, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fleet_id)
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "FleetVehicleAssignment"))?;

        Ok(assignment)
    }

    pub async fn assign_driver(
        &self,
        fleet_id: Uuid,
        driver_id: Uuid,
    ) -> Result<FleetDriverAssignment, AppError> {
        let assignment = sqlx::query_as::<_, FleetDriverAssignment>(
            r#"
            INSERT INTO fleet_driver_assignments (id, fleet_id, driver_id, assignment_date, is_active)
            VALUES ($1, $2, $3, CURRENT_DATE, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fleet_id)
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "FleetDriverAssignment"))?;

        Ok(assignment)
    }

    pub async fn count_active_vehicles(&self, fleet_id: Uuid) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM fleet_vehicle_assignments WHERE fleet_id = $1 AND is_active",
        )
        .bind(fleet_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    pub async fn count_active_drivers(&self, fleet_id: Uuid) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM fleet_driver_assignments WHERE fleet_id = $1 AND is_active",
        )
        .bind(fleet_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    pub async fn metrics(&self, fleet_id: Uuid) -> Result<Option<FleetPerformanceMetrics>, AppError> {
        let metrics = sqlx::query_as::<_, FleetPerformanceMetrics>(
            "SELECT * FROM fleet_performance_metrics WHERE fleet_id = $1",
        )
        .bind(fleet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::fleet_dto::CreateFleetRequest;
    use crate::dto::vehicle_dto::CreateVehicleRequest;
    use crate::repositories::vehicle_repository::VehicleRepository;
    use rust_decimal::Decimal;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        PgPool::connect(&url)
            .await
            .expect("failed to connect to test database")
    }

    // Requiere un Postgres con las migraciones aplicadas:
    //   DATABASE_URL=... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_duplicate_vehicle_assignment_is_conflict() {
        let pool = test_pool().await;
        let fleets = FleetRepository::new(pool.clone());
        let vehicles = VehicleRepository::new(pool);

        let suffix = Uuid::new_v4().simple().to_string();
        let fleet = fleets
            .create(CreateFleetRequest {
                name: format!("flota-{}", suffix),
                description: None,
                headquarters: None,
                manager_name: None,
                manager_email: None,
                manager_phone: None,
            })
            .await
            .unwrap();
        let vehicle = vehicles
            .create(CreateVehicleRequest {
                license_plate: format!("PL-{}", &suffix[..8]),
                vin: None,
                make: "Volvo".to_string(),
                model: "FH16".to_string(),
                year: Some(2022),
                vehicle_type: None,
                color: None,
                capacity: Decimal::new(24000, 0),
                fuel_type: None,
                transmission: None,
                odometer_reading: None,
                registration_date: None,
                last_service_date: None,
                insurance_expiry: None,
            })
            .await
            .unwrap();

        fleets.assign_vehicle(fleet.id, vehicle.id).await.unwrap();
        let err = fleets
            .assign_vehicle(fleet.id, vehicle.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        fleets.delete(fleet.id).await.unwrap();
        vehicles.delete(vehicle.id).await.unwrap();
    }
}
