pub mod common_dto;
pub mod driver_dto;
pub mod fleet_dto;
pub mod invoice_dto;
pub mod shipment_dto;
pub mod vehicle_dto;
