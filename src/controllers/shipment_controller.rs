use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::shipment_dto::{
    AssignVehicleDriverRequest, CreateRouteStopRequest, CreateShipmentRequest,
    CreateTrackingEventRequest, RouteStopResponse, ShipmentFilters, ShipmentListResponse,
    ShipmentResponse, TrackingEventResponse, UpdateShipmentRequest,
};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::shipment_repository::ShipmentRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};

pub struct ShipmentController {
    repository: ShipmentRepository,
    vehicle_repository: VehicleRepository,
    driver_repository: DriverRepository,
}

impl ShipmentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ShipmentRepository::new(pool.clone()),
            vehicle_repository: VehicleRepository::new(pool.clone()),
            driver_repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateShipmentRequest,
    ) -> Result<ApiResponse<ShipmentResponse>, AppError> {
        request.validate()?;

        let shipment = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            shipment.into(),
            "Envío creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ShipmentResponse, AppError> {
        let shipment = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        Ok(shipment.into())
    }

    pub async fn list(
        &self,
        filters: ShipmentFilters,
    ) -> Result<Vec<ShipmentListResponse>, AppError> {
        let shipments = self.repository.list(&filters).await?;
        Ok(shipments.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateShipmentRequest,
    ) -> Result<ApiResponse<ShipmentResponse>, AppError> {
        request.validate()?;

        let shipment = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            shipment.into(),
            "Envío actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }

    /// Ambos ids son obligatorios en el body; el que falte se reporta
    /// como error de validación sobre su campo.
    fn assignment_ids(request: &AssignVehicleDriverRequest) -> Result<(Uuid, Uuid), AppError> {
        let vehicle_id = request
            .vehicle_id
            .ok_or_else(|| validation_error("vehicle_id", "vehicle_id is required"))?;
        let driver_id = request
            .driver_id
            .ok_or_else(|| validation_error("driver_id", "driver_id is required"))?;
        Ok((vehicle_id, driver_id))
    }

    /// Asignación sin guardas de disponibilidad: vehículo y conductor solo
    /// deben existir. La operación funciona desde cualquier estado del envío.
    pub async fn assign_vehicle_driver(
        &self,
        id: Uuid,
        request: AssignVehicleDriverRequest,
    ) -> Result<ApiResponse<ShipmentResponse>, AppError> {
        let (vehicle_id, driver_id) = Self::assignment_ids(&request)?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        self.vehicle_repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        self.driver_repository
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let shipment = self
            .repository
            .assign_vehicle_driver(id, vehicle_id, driver_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            shipment.into(),
            "Vehículo y conductor asignados al envío".to_string(),
        ))
    }

    pub async fn start_transit(&self, id: Uuid) -> Result<ApiResponse<ShipmentResponse>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        let shipment = self.repository.start_transit(id, Utc::now()).await?;

        Ok(ApiResponse::success_with_message(
            shipment.into(),
            "Envío en tránsito".to_string(),
        ))
    }

    pub async fn complete_delivery(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<ShipmentResponse>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        let shipment = self.repository.complete_delivery(id, Utc::now()).await?;

        Ok(ApiResponse::success_with_message(
            shipment.into(),
            "Envío entregado exitosamente".to_string(),
        ))
    }

    pub async fn add_tracking_event(
        &self,
        shipment_id: Uuid,
        request: CreateTrackingEventRequest,
    ) -> Result<TrackingEventResponse, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(shipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        let event = self
            .repository
            .add_tracking_event(shipment_id, request)
            .await?;
        Ok(event.into())
    }

    pub async fn tracking_history(
        &self,
        shipment_id: Uuid,
    ) -> Result<Vec<TrackingEventResponse>, AppError> {
        self.repository
            .find_by_id(shipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        let events = self.repository.tracking_history(shipment_id).await?;
        Ok(events.into_iter().map(Into::into).collect())
    }

    pub async fn add_route_stop(
        &self,
        shipment_id: Uuid,
        request: CreateRouteStopRequest,
    ) -> Result<RouteStopResponse, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(shipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        let stop = self.repository.add_route_stop(shipment_id, request).await?;
        Ok(stop.into())
    }

    pub async fn route_stops(
        &self,
        shipment_id: Uuid,
    ) -> Result<Vec<RouteStopResponse>, AppError> {
        self.repository
            .find_by_id(shipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        let stops = self.repository.route_stops(shipment_id).await?;
        Ok(stops.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_without_vehicle_id_is_validation_error() {
        let request = AssignVehicleDriverRequest {
            vehicle_id: None,
            driver_id: Some(Uuid::new_v4()),
        };
        let err = ShipmentController::assignment_ids(&request).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("vehicle_id"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_without_driver_id_is_validation_error() {
        let request = AssignVehicleDriverRequest {
            vehicle_id: Some(Uuid::new_v4()),
            driver_id: None,
        };
        let err = ShipmentController::assignment_ids(&request).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("driver_id"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_with_both_ids() {
        let vehicle_id = Uuid::new_v4();
        let driver_id = Uuid::new_v4();
        let request = AssignVehicleDriverRequest {
            vehicle_id: Some(vehicle_id),
            driver_id: Some(driver_id),
        };
        let ids = ShipmentController::assignment_ids(&request).unwrap();
        assert_eq!(ids, (vehicle_id, driver_id));
    }
}
