//! DTOs de Invoice
//!
//! NOTA: total_amount no se valida contra base + tax - discount;
//! el cliente es responsable de la coherencia del total.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::invoice::{Invoice, InvoiceStatus};

/// Request para crear una factura asociada a un shipment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    pub shipment_id: Uuid,

    #[validate(length(min = 1, max = 50))]
    pub invoice_number: String,

    pub status: Option<InvoiceStatus>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub base_amount: Decimal,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub tax_amount: Decimal,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub discount_amount: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub total_amount: Decimal,

    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// Request para actualizar una factura (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    pub status: Option<InvoiceStatus>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub base_amount: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub tax_amount: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub discount_amount: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub total_amount: Option<Decimal>,

    pub issued_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,

    /// Ausente conserva la fecha actual; null explícito la limpia
    #[serde(default, deserialize_with = "crate::dto::common_dto::double_option")]
    pub paid_date: Option<Option<NaiveDate>>,
}

/// Filtros para búsqueda de facturas
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceFilters {
    pub status: Option<InvoiceStatus>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub shipment_id: Uuid,
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub base_amount: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            shipment_id: invoice.shipment_id,
            invoice_number: invoice.invoice_number,
            status: invoice.status,
            base_amount: invoice.base_amount,
            tax_amount: invoice.tax_amount,
            discount_amount: invoice.discount_amount,
            total_amount: invoice.total_amount,
            issued_date: invoice.issued_date,
            due_date: invoice.due_date,
            paid_date: invoice.paid_date,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            shipment_id: Uuid::new_v4(),
            invoice_number: "INV-2026-0001".to_string(),
            status: None,
            base_amount: Decimal::new(100000, 2),
            tax_amount: Decimal::new(21000, 2),
            discount_amount: None,
            total_amount: Decimal::new(121000, 2),
            issued_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            paid_date: None,
        }
    }

    #[test]
    fn test_create_invoice_request_valid() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn test_create_invoice_request_rejects_negative_amounts() {
        let mut request = base_request();
        request.base_amount = Decimal::new(-100, 2);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("base_amount"));

        let mut request = base_request();
        request.discount_amount = Some(Decimal::new(-1, 2));
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("discount_amount"));
    }

    #[test]
    fn test_update_invoice_paid_date_null_clears() {
        let request: UpdateInvoiceRequest = serde_json::from_str(r#"{"paid_date": null}"#).unwrap();
        assert_eq!(request.paid_date, Some(None));

        let request: UpdateInvoiceRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.paid_date, None);
    }
}
