use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::driver_dto::{
    CreateDriverRequest, CreateTrainingRequest, CreateViolationRequest, DriverFilters,
    DriverListResponse, DriverResponse, TrainingResponse, UpdateDriverRequest, ViolationResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_driver))
        .route("/", get(list_drivers))
        .route("/available", get(list_available_drivers))
        .route("/:id", get(get_driver))
        .route("/:id", put(update_driver))
        .route("/:id", delete(delete_driver))
        .route("/:id/violations", post(add_violation))
        .route("/:id/violations", get(list_violations))
        .route("/:id/trainings", post(add_training))
        .route("/:id/trainings", get(list_trainings))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(filters): Query<DriverFilters>,
) -> Result<Json<Vec<DriverListResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn list_available_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.list_available().await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Conductor eliminado exitosamente"
    })))
}

async fn add_violation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateViolationRequest>,
) -> Result<Json<ViolationResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.add_violation(id, request).await?;
    Ok(Json(response))
}

async fn list_violations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ViolationResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.violations(id).await?;
    Ok(Json(response))
}

async fn add_training(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateTrainingRequest>,
) -> Result<Json<TrainingResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.add_training(id, request).await?;
    Ok(Json(response))
}

async fn list_trainings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TrainingResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.trainings(id).await?;
    Ok(Json(response))
}
