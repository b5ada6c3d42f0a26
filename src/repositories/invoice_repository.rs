use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::invoice_dto::{CreateInvoiceRequest, InvoiceFilters, UpdateInvoiceRequest};
use crate::models::invoice::{Invoice, InvoiceStatus};
use crate::utils::errors::{map_constraint_error, AppError};

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear una factura. La relación 1:1 con el shipment y la unicidad
    /// del número de factura las impone la base de datos (Conflict).
    pub async fn create(&self, request: CreateInvoiceRequest) -> Result<Invoice, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (
                id, shipment_id, invoice_number, status, base_amount,
                tax_amount, discount_amount, total_amount, issued_date,
                due_date, paid_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.shipment_id)
        .bind(request.invoice_number)
        .bind(request.status.unwrap_or(InvoiceStatus::Draft))
        .bind(request.base_amount)
        .bind(request.tax_amount)
        .bind(request.discount_amount.unwrap_or_default())
        .bind(request.total_amount)
        .bind(request.issued_date)
        .bind(request.due_date)
        .bind(request.paid_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Invoice"))?;

        Ok(invoice)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    pub async fn list(&self, filters: &InvoiceFilters) -> Result<Vec<Invoice>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT i.* FROM invoices i JOIN shipments s ON s.id = i.shipment_id WHERE 1=1",
        );

        if let Some(status) = filters.status {
            qb.push(" AND i.status = ").push_bind(status);
        }
        if let Some(search) = &filters.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (i.invoice_number ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR s.shipment_id ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        let order = match filters.ordering.as_deref() {
            Some("issued_date") => "i.issued_date ASC",
            Some("due_date") => "i.due_date ASC",
            Some("-due_date") => "i.due_date DESC",
            _ => "i.issued_date DESC",
        };
        qb.push(" ORDER BY ").push(order);

        qb.push(" LIMIT ").push_bind(filters.limit.unwrap_or(100));
        qb.push(" OFFSET ").push_bind(filters.offset.unwrap_or(0));

        let invoices = qb.build_query_as::<Invoice>().fetch_all(&self.pool).await?;

        Ok(invoices)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<Invoice, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET status = $2, base_amount = $3, tax_amount = $4,
                discount_amount = $5, total_amount = $6, issued_date = $7,
                due_date = $8, paid_date = $9, updated_at = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.status.unwrap_or(current.status))
        .bind(request.base_amount.unwrap_or(current.base_amount))
        .bind(request.tax_amount.unwrap_or(current.tax_amount))
        .bind(request.discount_amount.unwrap_or(current.discount_amount))
        .bind(request.total_amount.unwrap_or(current.total_amount))
        .bind(request.issued_date.unwrap_or(current.issued_date))
        .bind(request.due_date.unwrap_or(current.due_date))
        // doble Option: ausente conserva, null explícito limpia la fecha
        .bind(request.paid_date.unwrap_or(current.paid_date))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Invoice"))?;

        Ok(invoice)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Invoice not found".to_string()));
        }

        Ok(())
    }
}
