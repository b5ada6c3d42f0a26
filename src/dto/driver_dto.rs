//! DTOs de Driver
//!
//! Incluye la validación del patrón fijo de teléfono y los atributos
//! derivados de licencia/disponibilidad en la respuesta de detalle.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::driver::{
    Driver, DriverStatus, DriverTraining, DriverViolation, LicenseClass, LicenseStatus,
    TrainingType, ViolationSeverity, ViolationType,
};
/// Request para registrar un nuevo conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "crate::utils::validation::validate_phone_number")]
    pub phone_number: String,

    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub nationality: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub license_number: String,

    pub license_class: Option<LicenseClass>,
    pub license_issue_date: NaiveDate,
    pub license_expiry_date: NaiveDate,
    pub license_status: Option<LicenseStatus>,

    pub employment_date: NaiveDate,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub hourly_rate: Option<Decimal>,

    pub medical_cert_expiry: Option<NaiveDate>,
    pub training_cert_expiry: Option<NaiveDate>,
    pub background_check_date: Option<NaiveDate>,
    pub background_check_status: Option<bool>,
}

/// Request para actualizar un conductor existente (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone_number")]
    pub phone_number: Option<String>,

    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub nationality: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub license_number: Option<String>,

    pub license_class: Option<LicenseClass>,
    pub license_issue_date: Option<NaiveDate>,
    pub license_expiry_date: Option<NaiveDate>,
    pub license_status: Option<LicenseStatus>,

    pub employment_date: Option<NaiveDate>,
    pub status: Option<DriverStatus>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub hourly_rate: Option<Decimal>,
    pub medical_cert_expiry: Option<NaiveDate>,
    pub training_cert_expiry: Option<NaiveDate>,
    pub background_check_date: Option<NaiveDate>,
    pub background_check_status: Option<bool>,
}

/// Filtros para búsqueda de conductores
#[derive(Debug, Default, Deserialize)]
pub struct DriverFilters {
    pub status: Option<DriverStatus>,
    pub license_status: Option<LicenseStatus>,
    pub license_class: Option<LicenseClass>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de conductor para la API - detalle
#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub nationality: Option<String>,
    pub license_number: String,
    pub license_class: LicenseClass,
    pub license_issue_date: NaiveDate,
    pub license_expiry_date: NaiveDate,
    pub license_status: LicenseStatus,
    pub employment_date: NaiveDate,
    pub status: DriverStatus,
    pub hourly_rate: Option<Decimal>,
    pub medical_cert_expiry: Option<NaiveDate>,
    pub training_cert_expiry: Option<NaiveDate>,
    pub background_check_date: Option<NaiveDate>,
    pub background_check_status: bool,
    // derivados, calculados en lectura
    pub is_license_valid: bool,
    pub is_available: bool,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response de conductor para listados - subconjunto abreviado
#[derive(Debug, Serialize)]
pub struct DriverListResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub license_number: String,
    pub license_status: LicenseStatus,
    pub status: DriverStatus,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        let now = Utc::now();
        let is_license_valid = driver.is_license_valid(now);
        let is_available = driver.is_available(now);
        let age = driver.age(now);
        Self {
            id: driver.id,
            name: driver.name,
            email: driver.email,
            phone_number: driver.phone_number,
            date_of_birth: driver.date_of_birth,
            address: driver.address,
            city: driver.city,
            postal_code: driver.postal_code,
            nationality: driver.nationality,
            license_number: driver.license_number,
            license_class: driver.license_class,
            license_issue_date: driver.license_issue_date,
            license_expiry_date: driver.license_expiry_date,
            license_status: driver.license_status,
            employment_date: driver.employment_date,
            status: driver.status,
            hourly_rate: driver.hourly_rate,
            medical_cert_expiry: driver.medical_cert_expiry,
            training_cert_expiry: driver.training_cert_expiry,
            background_check_date: driver.background_check_date,
            background_check_status: driver.background_check_status,
            is_license_valid,
            is_available,
            age,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

impl From<Driver> for DriverListResponse {
    fn from(driver: Driver) -> Self {
        let is_available = driver.is_available(Utc::now());
        Self {
            id: driver.id,
            name: driver.name,
            email: driver.email,
            license_number: driver.license_number,
            license_status: driver.license_status,
            status: driver.status,
            is_available,
            created_at: driver.created_at,
        }
    }
}

/// Request para registrar una violación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateViolationRequest {
    pub violation_type: ViolationType,
    pub severity: ViolationSeverity,
    #[validate(length(min = 1))]
    pub description: String,
    pub violation_date: NaiveDate,
    #[validate(length(min = 1, max = 300))]
    pub location: String,
    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub fine_amount: Option<Decimal>,
    pub is_resolved: Option<bool>,
}

/// Request para registrar una formación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrainingRequest {
    pub training_type: TrainingType,
    pub training_date: NaiveDate,
    pub expiry_date: NaiveDate,
    #[validate(length(min = 1, max = 200))]
    pub provider: String,
    #[validate(length(max = 100))]
    pub certificate_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ViolationResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub violation_type: ViolationType,
    pub severity: ViolationSeverity,
    pub description: String,
    pub violation_date: NaiveDate,
    pub location: String,
    pub fine_amount: Option<Decimal>,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TrainingResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub training_type: TrainingType,
    pub training_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub provider: String,
    pub certificate_number: Option<String>,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DriverViolation> for ViolationResponse {
    fn from(v: DriverViolation) -> Self {
        Self {
            id: v.id,
            driver_id: v.driver_id,
            violation_type: v.violation_type,
            severity: v.severity,
            description: v.description,
            violation_date: v.violation_date,
            location: v.location,
            fine_amount: v.fine_amount,
            is_resolved: v.is_resolved,
            created_at: v.created_at,
        }
    }
}

impl From<DriverTraining> for TrainingResponse {
    fn from(t: DriverTraining) -> Self {
        let is_valid = t.is_valid(Utc::now());
        Self {
            id: t.id,
            driver_id: t.driver_id,
            training_type: t.training_type,
            training_date: t.training_date,
            expiry_date: t.expiry_date,
            provider: t.provider,
            certificate_number: t.certificate_number,
            is_valid,
            created_at: t.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_driver_request_phone_validation() {
        let request = CreateDriverRequest {
            name: "Ana Torres".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "no-es-telefono".to_string(),
            date_of_birth: None,
            address: None,
            city: None,
            postal_code: None,
            nationality: None,
            license_number: "LIC-0001".to_string(),
            license_class: None,
            license_issue_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            license_expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            license_status: None,
            employment_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            hourly_rate: None,
            medical_cert_expiry: None,
            training_cert_expiry: None,
            background_check_date: None,
            background_check_status: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn test_create_driver_request_valid() {
        let request = CreateDriverRequest {
            name: "Ana Torres".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "+34612345678".to_string(),
            date_of_birth: None,
            address: None,
            city: None,
            postal_code: None,
            nationality: None,
            license_number: "LIC-0001".to_string(),
            license_class: None,
            license_issue_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            license_expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            license_status: None,
            employment_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            hourly_rate: None,
            medical_cert_expiry: None,
            training_cert_expiry: None,
            background_check_date: None,
            background_check_status: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_driver_request_rejects_negative_hourly_rate() {
        let request = CreateDriverRequest {
            name: "Ana Torres".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "+34612345678".to_string(),
            date_of_birth: None,
            address: None,
            city: None,
            postal_code: None,
            nationality: None,
            license_number: "LIC-0001".to_string(),
            license_class: None,
            license_issue_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            license_expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            license_status: None,
            employment_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            hourly_rate: Some(Decimal::new(-1850, 2)),
            medical_cert_expiry: None,
            training_cert_expiry: None,
            background_check_date: None,
            background_check_status: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("hourly_rate"));
    }
}
