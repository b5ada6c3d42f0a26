use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateFuelLogRequest, CreateMaintenanceLogRequest, CreateVehicleRequest, FuelLogResponse,
    MaintenanceLogResponse, UpdateVehicleRequest, VehicleFilters, VehicleListResponse,
    VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/available", get(list_available_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/maintenance-logs", post(add_maintenance_log))
        .route("/:id/maintenance-logs", get(maintenance_history))
        .route("/:id/fuel-logs", post(add_fuel_log))
        .route("/:id/fuel-logs", get(fuel_history))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<Vec<VehicleListResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn list_available_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_available().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}

async fn add_maintenance_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateMaintenanceLogRequest>,
) -> Result<Json<MaintenanceLogResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.add_maintenance_log(id, request).await?;
    Ok(Json(response))
}

async fn maintenance_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceLogResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.maintenance_history(id).await?;
    Ok(Json(response))
}

async fn add_fuel_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateFuelLogRequest>,
) -> Result<Json<FuelLogResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.add_fuel_log(id, request).await?;
    Ok(Json(response))
}

async fn fuel_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FuelLogResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.fuel_history(id).await?;
    Ok(Json(response))
}
