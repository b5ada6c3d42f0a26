use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::shipment_controller::ShipmentController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::shipment_dto::{
    AssignVehicleDriverRequest, CreateRouteStopRequest, CreateShipmentRequest,
    CreateTrackingEventRequest, RouteStopResponse, ShipmentFilters, ShipmentListResponse,
    ShipmentResponse, TrackingEventResponse, UpdateShipmentRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_shipment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_shipment))
        .route("/", get(list_shipments))
        .route("/:id", get(get_shipment))
        .route("/:id", put(update_shipment))
        .route("/:id", delete(delete_shipment))
        .route("/:id/assign-vehicle-driver", post(assign_vehicle_driver))
        .route("/:id/start-transit", post(start_transit))
        .route("/:id/complete-delivery", post(complete_delivery))
        .route("/:id/tracking", post(add_tracking_event))
        .route("/:id/tracking", get(tracking_history))
        .route("/:id/route-stops", post(add_route_stop))
        .route("/:id/route-stops", get(list_route_stops))
}

async fn create_shipment(
    State(state): State<AppState>,
    Json(request): Json<CreateShipmentRequest>,
) -> Result<Json<ApiResponse<ShipmentResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_shipments(
    State(state): State<AppState>,
    Query(filters): Query<ShipmentFilters>,
) -> Result<Json<Vec<ShipmentListResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShipmentResponse>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateShipmentRequest>,
) -> Result<Json<ApiResponse<ShipmentResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Envío eliminado exitosamente"
    })))
}

async fn assign_vehicle_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignVehicleDriverRequest>,
) -> Result<Json<ApiResponse<ShipmentResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.assign_vehicle_driver(id, request).await?;
    Ok(Json(response))
}

async fn start_transit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShipmentResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.start_transit(id).await?;
    Ok(Json(response))
}

async fn complete_delivery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShipmentResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.complete_delivery(id).await?;
    Ok(Json(response))
}

async fn add_tracking_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateTrackingEventRequest>,
) -> Result<Json<TrackingEventResponse>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.add_tracking_event(id, request).await?;
    Ok(Json(response))
}

async fn tracking_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TrackingEventResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.tracking_history(id).await?;
    Ok(Json(response))
}

async fn add_route_stop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateRouteStopRequest>,
) -> Result<Json<RouteStopResponse>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.add_route_stop(id, request).await?;
    Ok(Json(response))
}

async fn list_route_stops(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RouteStopResponse>>, AppError> {
    let controller = ShipmentController::new(state.pool.clone());
    let response = controller.route_stops(id).await?;
    Ok(Json(response))
}
