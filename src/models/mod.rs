//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, junto con sus atributos derivados (calculados en
//! lectura, nunca persistidos).

pub mod driver;
pub mod fleet;
pub mod invoice;
pub mod shipment;
pub mod vehicle;

pub use driver::{
    Driver, DriverStatus, DriverTraining, DriverViolation, LicenseClass, LicenseStatus,
    TrainingType, ViolationSeverity, ViolationType,
};
pub use fleet::{
    Fleet, FleetDriverAssignment, FleetPerformanceMetrics, FleetStatus, FleetVehicleAssignment,
};
pub use invoice::{Invoice, InvoiceStatus};
pub use shipment::{
    DeliveryRoute, Shipment, ShipmentPriority, ShipmentStatus, ShipmentTracking, TrackingStatus,
};
pub use vehicle::{
    FuelType, MaintenanceType, Transmission, Vehicle, VehicleFuelLog, VehicleMaintenanceLog,
    VehicleStatus, VehicleType,
};
