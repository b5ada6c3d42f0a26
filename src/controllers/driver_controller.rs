use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::driver_dto::{
    CreateDriverRequest, CreateTrainingRequest, CreateViolationRequest, DriverFilters,
    DriverListResponse, DriverResponse, TrainingResponse, UpdateDriverRequest, ViolationResponse,
};
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::AppError;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let driver = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Conductor creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(driver.into())
    }

    pub async fn list(&self, filters: DriverFilters) -> Result<Vec<DriverListResponse>, AppError> {
        let drivers = self.repository.list(&filters).await?;
        Ok(drivers.into_iter().map(Into::into).collect())
    }

    pub async fn list_available(&self) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self.repository.list_available().await?;
        Ok(drivers.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let driver = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn add_violation(
        &self,
        driver_id: Uuid,
        request: CreateViolationRequest,
    ) -> Result<ViolationResponse, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let violation = self.repository.add_violation(driver_id, request).await?;
        Ok(violation.into())
    }

    pub async fn violations(&self, driver_id: Uuid) -> Result<Vec<ViolationResponse>, AppError> {
        self.repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let violations = self.repository.violations(driver_id).await?;
        Ok(violations.into_iter().map(Into::into).collect())
    }

    pub async fn add_training(
        &self,
        driver_id: Uuid,
        request: CreateTrainingRequest,
    ) -> Result<TrainingResponse, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let training = self.repository.add_training(driver_id, request).await?;
        Ok(training.into())
    }

    pub async fn trainings(&self, driver_id: Uuid) -> Result<Vec<TrainingResponse>, AppError> {
        self.repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let trainings = self.repository.trainings(driver_id).await?;
        Ok(trainings.into_iter().map(Into::into).collect())
    }
}
