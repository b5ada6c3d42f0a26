use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::driver_dto::{
    CreateDriverRequest, CreateTrainingRequest, CreateViolationRequest, DriverFilters,
    UpdateDriverRequest,
};
use crate::models::driver::{
    Driver, DriverStatus, DriverTraining, DriverViolation, LicenseClass, LicenseStatus,
};
use crate::utils::errors::{map_constraint_error, AppError};

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateDriverRequest) -> Result<Driver, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (
                id, name, email, phone_number, date_of_birth, address, city,
                postal_code, nationality, license_number, license_class,
                license_issue_date, license_expiry_date, license_status,
                employment_date, status, hourly_rate, medical_cert_expiry,
                training_cert_expiry, background_check_date,
                background_check_status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $22)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.phone_number)
        .bind(request.date_of_birth)
        .bind(request.address)
        .bind(request.city)
        .bind(request.postal_code)
        .bind(request.nationality)
        .bind(request.license_number)
        .bind(request.license_class.unwrap_or(LicenseClass::B))
        .bind(request.license_issue_date)
        .bind(request.license_expiry_date)
        .bind(request.license_status.unwrap_or(LicenseStatus::Valid))
        .bind(request.employment_date)
        .bind(DriverStatus::Active)
        .bind(request.hourly_rate)
        .bind(request.medical_cert_expiry)
        .bind(request.training_cert_expiry)
        .bind(request.background_check_date)
        .bind(request.background_check_status.unwrap_or(false))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Driver"))?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn list(&self, filters: &DriverFilters) -> Result<Vec<Driver>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM drivers WHERE 1=1");

        if let Some(status) = filters.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(license_status) = filters.license_status {
            qb.push(" AND license_status = ").push_bind(license_status);
        }
        if let Some(license_class) = filters.license_class {
            qb.push(" AND license_class = ").push_bind(license_class);
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR license_number ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR phone_number ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        let order = match filters.ordering.as_deref() {
            Some("name") => "name ASC",
            Some("-name") => "name DESC",
            Some("license_expiry_date") => "license_expiry_date ASC",
            Some("-license_expiry_date") => "license_expiry_date DESC",
            Some("created_at") => "created_at ASC",
            _ => "created_at DESC",
        };
        qb.push(" ORDER BY ").push(order);

        qb.push(" LIMIT ").push_bind(filters.limit.unwrap_or(100));
        qb.push(" OFFSET ").push_bind(filters.offset.unwrap_or(0));

        let drivers = qb.build_query_as::<Driver>().fetch_all(&self.pool).await?;

        Ok(drivers)
    }

    /// Conductores disponibles: activos y con licencia en estado 'valid'
    pub async fn list_available(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT * FROM drivers WHERE status = $1 AND license_status = $2 ORDER BY created_at DESC",
        )
        .bind(DriverStatus::Active)
        .bind(LicenseStatus::Valid)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> Result<Driver, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, email = $3, phone_number = $4, date_of_birth = $5,
                address = $6, city = $7, postal_code = $8, nationality = $9,
                license_number = $10, license_class = $11,
                license_issue_date = $12, license_expiry_date = $13,
                license_status = $14, employment_date = $15, status = $16,
                hourly_rate = $17, medical_cert_expiry = $18,
                training_cert_expiry = $19, background_check_date = $20,
                background_check_status = $21, updated_at = $22
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.unwrap_or(current.name))
        .bind(request.email.unwrap_or(current.email))
        .bind(request.phone_number.unwrap_or(current.phone_number))
        .bind(request.date_of_birth.or(current.date_of_birth))
        .bind(request.address.or(current.address))
        .bind(request.city.or(current.city))
        .bind(request.postal_code.or(current.postal_code))
        .bind(request.nationality.or(current.nationality))
        .bind(request.license_number.unwrap_or(current.license_number))
        .bind(request.license_class.unwrap_or(current.license_class))
        .bind(request.license_issue_date.unwrap_or(current.license_issue_date))
        .bind(request.license_expiry_date.unwrap_or(current.license_expiry_date))
        .bind(request.license_status.unwrap_or(current.license_status))
        .bind(request.employment_date.unwrap_or(current.employment_date))
        .bind(request.status.unwrap_or(current.status))
        .bind(request.hourly_rate.or(current.hourly_rate))
        .bind(request.medical_cert_expiry.or(current.medical_cert_expiry))
        .bind(request.training_cert_expiry.or(current.training_cert_expiry))
        .bind(request.background_check_date.or(current.background_check_date))
        .bind(
            request
                .background_check_status
                .unwrap_or(current.background_check_status),
        )
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Driver"))?;

        Ok(driver)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Driver not found".to_string()));
        }

        Ok(())
    }

    pub async fn add_violation(
        &self,
        driver_id: Uuid,
        request: CreateViolationRequest,
    ) -> Result<DriverViolation, AppError> {
        let violation = sqlx::query_as::<_, DriverViolation>(
            r#"
            INSERT INTO driver_violations (
                id, driver_id, violation_type, severity, description,
                violation_date, location, fine_amount, is_resolved, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(request.violation_type)
        .bind(request.severity)
        .bind(request.description)
        .bind(request.violation_date)
        .bind(request.location)
        .bind(request.fine_amount)
        .bind(request.is_resolved.unwrap_or(false))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "DriverViolation"))?;

        Ok(violation)
    }

    pub async fn violations(&self, driver_id: Uuid) -> Result<Vec<DriverViolation>, AppError> {
        let violations = sqlx::query_as::<_, DriverViolation>(
            "SELECT * FROM driver_violations WHERE driver_id = $1 ORDER BY violation_date DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(violations)
    }

    pub async fn add_training(
        &self,
        driver_id: Uuid,
        request: CreateTrainingRequest,
    ) -> Result<DriverTraining, AppError> {
        let training = sqlx::query_as::<_, DriverTraining>(
            r#"
            INSERT INTO driver_trainings (
                id, driver_id, training_type, training_date, expiry_date,
                provider, certificate_number, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(request.training_type)
        .bind(request.training_date)
        .bind(request.expiry_date)
        .bind(request.provider)
        .bind(request.certificate_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "DriverTraining"))?;

        Ok(training)
    }

    pub async fn trainings(&self, driver_id: Uuid) -> Result<Vec<DriverTraining>, AppError> {
        let trainings = sqlx::query_as::<_, DriverTraining>(
            "SELECT * FROM driver_trainings WHERE driver_id = $1 ORDER BY training_date DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trainings)
    }
}
