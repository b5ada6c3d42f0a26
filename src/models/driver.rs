//! Modelo de Driver
//!
//! Contiene el struct Driver, sus registros satélite (violaciones y
//! formaciones) y los atributos derivados que se calculan en lectura.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del conductor - mapea al ENUM driver_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "driver_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Active,
    Inactive,
    OnLeave,
    Terminated,
}

/// Estado de la licencia - mapea al ENUM license_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "license_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Valid,
    Expired,
    Suspended,
}

/// Clase de licencia - mapea al ENUM license_class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "license_class", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LicenseClass {
    A,
    B,
    C,
    D,
    E,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "violation_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    Speeding,
    TrafficLight,
    UnsafeDriving,
    Parking,
    Accident,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "violation_severity", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Minor,
    Moderate,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "training_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    Safety,
    DefensiveDriving,
    Hazmat,
    Passenger,
    Cargo,
    Other,
}

/// Driver principal - mapea a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// La licencia es válida si su estado es 'valid' y la fecha de
    /// expiración es estrictamente posterior a la fecha de evaluación.
    pub fn is_license_valid(&self, now: DateTime<Utc>) -> bool {
        if self.license_status != LicenseStatus::Valid {
            return false;
        }
        self.license_expiry_date > now.date_naive()
    }

    /// Disponible para asignación: activo y con licencia válida.
    /// Informativo - ninguna operación de asignación lo exige.
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        self.status == DriverStatus::Active && self.is_license_valid(now)
    }

    /// Edad en años, ajustada si el cumpleaños aún no llegó este año.
    pub fn age(&self, now: DateTime<Utc>) -> Option<i32> {
        let dob = self.date_of_birth?;
        let today = now.date_naive();
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        Some(years)
    }
}

/// Violación de tráfico registrada para un conductor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverViolation {
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

/// Registro de formación/certificación de un conductor
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverTraining {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub training_type: TrainingType,
    pub training_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub provider: String,
    pub certificate_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DriverTraining {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date > now.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn driver_fixture() -> Driver {
        Driver {
            id: Uuid::new_v4(),
            name: "Ana Torres".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "+34612345678".to_string(),
            date_of_birth: Some(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap()),
            address: None,
            city: None,
            postal_code: None,
            nationality: None,
            license_number: "LIC-0001".to_string(),
            license_class: LicenseClass::B,
            license_issue_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            license_expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            license_status: LicenseStatus::Valid,
            employment_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            status: DriverStatus::Active,
            hourly_rate: None,
            medical_cert_expiry: None,
            training_cert_expiry: None,
            background_check_date: None,
            background_check_status: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_license_invalid_when_status_not_valid() {
        let now = Utc::now();
        for status in [LicenseStatus::Expired, LicenseStatus::Suspended] {
            let mut driver = driver_fixture();
            driver.license_status = status;
            // la fecha de expiración no importa si el estado no es 'valid'
            driver.license_expiry_date = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
            assert!(!driver.is_license_valid(now));
        }
    }

    #[test]
    fn test_license_valid_depends_on_expiry_date() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut driver = driver_fixture();

        driver.license_expiry_date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(driver.is_license_valid(now));

        // expiración ayer -> inválida aunque el estado sea 'valid'
        driver.license_expiry_date = now.date_naive() - Duration::days(1);
        assert!(!driver.is_license_valid(now));

        // expiración hoy mismo -> inválida (tiene que ser estrictamente futura)
        driver.license_expiry_date = now.date_naive();
        assert!(!driver.is_license_valid(now));
    }

    #[test]
    fn test_availability_requires_active_status_and_valid_license() {
        let now = Utc::now();
        let mut driver = driver_fixture();
        assert!(driver.is_available(now));

        driver.status = DriverStatus::OnLeave;
        assert!(!driver.is_available(now));

        driver.status = DriverStatus::Active;
        driver.license_status = LicenseStatus::Suspended;
        assert!(!driver.is_available(now));
    }

    #[test]
    fn test_age_adjusts_for_birthday_not_yet_reached() {
        let mut driver = driver_fixture();
        driver.date_of_birth = Some(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());

        // antes del cumpleaños
        let now = Utc.with_ymd_and_hms(2025, 6, 14, 0, 0, 0).unwrap();
        assert_eq!(driver.age(now), Some(34));

        // el día del cumpleaños
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(driver.age(now), Some(35));
    }

    #[test]
    fn test_age_without_birth_date() {
        let mut driver = driver_fixture();
        driver.date_of_birth = None;
        assert_eq!(driver.age(Utc::now()), None);
    }

    #[test]
    fn test_training_validity() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        let training = DriverTraining {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            training_type: TrainingType::Hazmat,
            training_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 11).unwrap(),
            provider: "SafeCo".to_string(),
            certificate_number: None,
            created_at: Utc::now(),
        };
        assert!(training.is_valid(now));

        let expired = DriverTraining {
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            ..training
        };
        assert!(!expired.is_valid(now));
    }
}
