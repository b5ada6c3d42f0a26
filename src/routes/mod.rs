pub mod driver_routes;
pub mod fleet_routes;
pub mod health_routes;
pub mod invoice_routes;
pub mod shipment_routes;
pub mod vehicle_routes;
