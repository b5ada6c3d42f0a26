use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateFuelLogRequest, CreateMaintenanceLogRequest, CreateVehicleRequest, FuelLogResponse,
    MaintenanceLogResponse, UpdateVehicleRequest, VehicleFilters, VehicleListResponse,
    VehicleResponse,
};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleListResponse>, AppError> {
        let vehicles = self.repository.list(&filters).await?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    pub async fn list_available(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list_available().await?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    pub async fn add_maintenance_log(
        &self,
        vehicle_id: Uuid,
        request: CreateMaintenanceLogRequest,
    ) -> Result<MaintenanceLogResponse, AppError> {
        request.validate()?;

        // el log pertenece al vehículo: verificar que existe
        self.repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let log = self.repository.add_maintenance_log(vehicle_id, request).await?;
        Ok(log.into())
    }

    pub async fn maintenance_history(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceLogResponse>, AppError> {
        self.repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let logs = self.repository.maintenance_history(vehicle_id).await?;
        Ok(logs.into_iter().map(Into::into).collect())
    }

    pub async fn add_fuel_log(
        &self,
        vehicle_id: Uuid,
        request: CreateFuelLogRequest,
    ) -> Result<FuelLogResponse, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let log = self.repository.add_fuel_log(vehicle_id, request).await?;
        Ok(log.into())
    }

    pub async fn fuel_history(&self, vehicle_id: Uuid) -> Result<Vec<FuelLogResponse>, AppError> {
        self.repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let logs = self.repository.fuel_history(vehicle_id).await?;
        Ok(logs.into_iter().map(Into::into).collect())
    }
}
