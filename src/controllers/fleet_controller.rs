use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::fleet_dto::{
    AssignDriverRequest, AssignVehicleRequest, CreateFleetRequest, DriverAssignmentResponse,
    FleetFilters, FleetListResponse, FleetMetricsResponse, FleetResponse, UpdateFleetRequest,
    VehicleAssignmentResponse,
};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};

pub struct FleetController {
    repository: FleetRepository,
    vehicle_repository: VehicleRepository,
    driver_repository: DriverRepository,
}

impl FleetController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FleetRepository::new(pool.clone()),
            vehicle_repository: VehicleRepository::new(pool.clone()),
            driver_repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateFleetRequest,
    ) -> Result<ApiResponse<FleetResponse>, AppError> {
        request.validate()?;

        let fleet = self.repository.create(request).await?;

        // una flota recién creada no tiene asignaciones todavía
        Ok(ApiResponse::success_with_message(
            FleetResponse::from_fleet(fleet, 0, 0),
            "Flota creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FleetResponse, AppError> {
        let fleet = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flota no encontrada".to_string()))?;

        // los totales se recalculan sobre las asignaciones activas en cada lectura
        let total_vehicles = self.repository.count_active_vehicles(id).await?;
        let total_drivers = self.repository.count_active_drivers(id).await?;

        Ok(FleetResponse::from_fleet(fleet, total_vehicles, total_drivers))
    }

    pub async fn list(&self, filters: FleetFilters) -> Result<Vec<FleetListResponse>, AppError> {
        let fleets = self.repository.list(&filters).await?;
        Ok(fleets.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateFleetRequest,
    ) -> Result<ApiResponse<FleetResponse>, AppError> {
        request.validate()?;

        let fleet = self.repository.update(id, request).await?;

        let total_vehicles = self.repository.count_active_vehicles(id).await?;
        let total_drivers = self.repository.count_active_drivers(id).await?;

        Ok(ApiResponse::success_with_message(
            FleetResponse::from_fleet(fleet, total_vehicles, total_drivers),
            "Flota actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    fn required_vehicle_id(request: &AssignVehicleRequest) -> Result<Uuid, AppError> {
        request
            .vehicle_id
            .ok_or_else(|| validation_error("vehicle_id", "vehicle_id is required"))
    }

    fn required_driver_id(request: &AssignDriverRequest) -> Result<Uuid, AppError> {
        request
            .driver_id
            .ok_or_else(|| validation_error("driver_id", "driver_id is required"))
    }

    /// La disponibilidad del vehículo es informativa: aquí solo se
    /// verifica existencia, nunca el estado.
    pub async fn assign_vehicle(
        &self,
        fleet_id: Uuid,
        request: AssignVehicleRequest,
    ) -> Result<ApiResponse<VehicleAssignmentResponse>, AppError> {
        let vehicle_id = Self::required_vehicle_id(&request)?;

        self.repository
            .find_by_id(fleet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flota no encontrada".to_string()))?;

        self.vehicle_repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let assignment = self.repository.assign_vehicle(fleet_id, vehicle_id).await?;

        Ok(ApiResponse::success_with_message(
            assignment.into(),
            "Vehículo asignado a la flota exitosamente".to_string(),
        ))
    }

    pub async fn assign_driver(
        &self,
        fleet_id: Uuid,
        request: AssignDriverRequest,
    ) -> Result<ApiResponse<DriverAssignmentResponse>, AppError> {
        let driver_id = Self::required_driver_id(&request)?;

        self.repository
            .find_by_id(fleet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flota no encontrada".to_string()))?;

        self.driver_repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let assignment = self.repository.assign_driver(fleet_id, driver_id).await?;

        Ok(ApiResponse::success_with_message(
            assignment.into(),
            "Conductor asignado a la flota exitosamente".to_string(),
        ))
    }

    pub async fn metrics(&self, fleet_id: Uuid) -> Result<FleetMetricsResponse, AppError> {
        self.repository
            .find_by_id(fleet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flota no encontrada".to_string()))?;

        // la fila de métricas se crea en la misma transacción que la flota;
        // su ausencia es una inconsistencia de datos
        let metrics = self
            .repository
            .metrics(fleet_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("missing performance metrics for fleet {}", fleet_id))
            })?;

        Ok(metrics.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_vehicle_without_id_is_validation_error() {
        let request = AssignVehicleRequest { vehicle_id: None };
        let err = FleetController::required_vehicle_id(&request).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("vehicle_id"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_assign_driver_without_id_is_validation_error() {
        let request = AssignDriverRequest { driver_id: None };
        let err = FleetController::required_driver_id(&request).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("driver_id"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
