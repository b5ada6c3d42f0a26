use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::invoice_dto::{
    CreateInvoiceRequest, InvoiceFilters, InvoiceResponse, UpdateInvoiceRequest,
};
use crate::repositories::invoice_repository::InvoiceRepository;
use crate::repositories::shipment_repository::ShipmentRepository;
use crate::utils::errors::AppError;

pub struct InvoiceController {
    repository: InvoiceRepository,
    shipment_repository: ShipmentRepository,
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            shipment_repository: ShipmentRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<ApiResponse<InvoiceResponse>, AppError> {
        request.validate()?;

        // el shipment debe existir; la unicidad 1:1 y del número de factura
        // la respalda la base de datos como Conflict
        self.shipment_repository
            .find_by_id(request.shipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Envío no encontrado".to_string()))?;

        let invoice = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            invoice.into(),
            "Factura creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<InvoiceResponse, AppError> {
        let invoice = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Factura no encontrada".to_string()))?;

        Ok(invoice.into())
    }

    pub async fn list(&self, filters: InvoiceFilters) -> Result<Vec<InvoiceResponse>, AppError> {
        let invoices = self.repository.list(&filters).await?;
        Ok(invoices.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<ApiResponse<InvoiceResponse>, AppError> {
        request.validate()?;

        let invoice = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            invoice.into(),
            "Factura actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
