use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::fleet_controller::FleetController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::fleet_dto::{
    AssignDriverRequest, AssignVehicleRequest, CreateFleetRequest, DriverAssignmentResponse,
    FleetFilters, FleetListResponse, FleetMetricsResponse, FleetResponse, UpdateFleetRequest,
    VehicleAssignmentResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fleet))
        .route("/", get(list_fleets))
        .route("/:id", get(get_fleet))
        .route("/:id", put(update_fleet))
        .route("/:id", delete(delete_fleet))
        .route("/:id/assign-vehicle", post(assign_vehicle))
        .route("/:id/assign-driver", post(assign_driver))
        .route("/:id/metrics", get(fleet_metrics))
}

async fn create_fleet(
    State(state): State<AppState>,
    Json(request): Json<CreateFleetRequest>,
) -> Result<Json<ApiResponse<FleetResponse>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_fleets(
    State(state): State<AppState>,
    Query(filters): Query<FleetFilters>,
) -> Result<Json<Vec<FleetListResponse>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_fleet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FleetResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_fleet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFleetRequest>,
) -> Result<Json<ApiResponse<FleetResponse>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_fleet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Flota eliminada exitosamente"
    })))
}

async fn assign_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleAssignmentResponse>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.assign_vehicle(id, request).await?;
    Ok(Json(response))
}

async fn assign_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignDriverRequest>,
) -> Result<Json<ApiResponse<DriverAssignmentResponse>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.assign_driver(id, request).await?;
    Ok(Json(response))
}

async fn fleet_metrics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FleetMetricsResponse>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.metrics(id).await?;
    Ok(Json(response))
}
