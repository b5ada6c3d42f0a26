use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::InvoiceController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::invoice_dto::{
    CreateInvoiceRequest, InvoiceFilters, InvoiceResponse, UpdateInvoiceRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_invoice))
        .route("/", get(list_invoices))
        .route("/:id", get(get_invoice))
        .route("/:id", put(update_invoice))
        .route("/:id", delete(delete_invoice))
}

async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_invoices(
    State(state): State<AppState>,
    Query(filters): Query<InvoiceFilters>,
) -> Result<Json<Vec<InvoiceResponse>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceRequest>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Factura eliminada exitosamente"
    })))
}
