mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod utils;

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::create_pool;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 FleetFlow - Backend de gestión de flotas y logística");
    info!("======================================================");

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => {
            info!("✅ Base de datos conectada exitosamente");
            pool
        }
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let config = EnvironmentConfig::from_env();

    // En producción los orígenes CORS vienen de CORS_ORIGINS; en desarrollo
    // se permite cualquier origen
    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .nest("/api", routes::health_routes::create_health_router())
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/drivers", routes::driver_routes::create_driver_router())
        .nest("/api/fleet", routes::fleet_routes::create_fleet_router())
        .nest(
            "/api/logistics/shipments",
            routes::shipment_routes::create_shipment_router(),
        )
        .nest(
            "/api/logistics/invoices",
            routes::invoice_routes::create_invoice_router(),
        )
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("   GET  /api/version - Versión del servidor");
    info!("🚗 Endpoints - Vehicles:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos (filtros, búsqueda, orden)");
    info!("   GET  /api/vehicles/available - Vehículos disponibles");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("   POST /api/vehicles/:id/maintenance-logs - Registrar mantenimiento");
    info!("   GET  /api/vehicles/:id/maintenance-logs - Historial de mantenimiento");
    info!("   POST /api/vehicles/:id/fuel-logs - Registrar carga de combustible");
    info!("   GET  /api/vehicles/:id/fuel-logs - Historial de combustible");
    info!("🧑 Endpoints - Drivers:");
    info!("   POST /api/drivers - Crear conductor");
    info!("   GET  /api/drivers - Listar conductores");
    info!("   GET  /api/drivers/available - Conductores disponibles");
    info!("   GET  /api/drivers/:id - Obtener conductor");
    info!("   PUT  /api/drivers/:id - Actualizar conductor");
    info!("   DELETE /api/drivers/:id - Eliminar conductor");
    info!("   POST /api/drivers/:id/violations - Registrar infracción");
    info!("   GET  /api/drivers/:id/violations - Infracciones del conductor");
    info!("   POST /api/drivers/:id/trainings - Registrar capacitación");
    info!("   GET  /api/drivers/:id/trainings - Capacitaciones del conductor");
    info!("🚛 Endpoints - Fleet:");
    info!("   POST /api/fleet - Crear flota");
    info!("   GET  /api/fleet - Listar flotas");
    info!("   GET  /api/fleet/:id - Obtener flota (totales recalculados)");
    info!("   PUT  /api/fleet/:id - Actualizar flota");
    info!("   DELETE /api/fleet/:id - Eliminar flota");
    info!("   POST /api/fleet/:id/assign-vehicle - Asignar vehículo");
    info!("   POST /api/fleet/:id/assign-driver - Asignar conductor");
    info!("   GET  /api/fleet/:id/metrics - Métricas de desempeño");
    info!("📦 Endpoints - Logistics:");
    info!("   POST /api/logistics/shipments - Crear envío");
    info!("   GET  /api/logistics/shipments - Listar envíos");
    info!("   GET  /api/logistics/shipments/:id - Obtener envío");
    info!("   PUT  /api/logistics/shipments/:id - Actualizar envío");
    info!("   DELETE /api/logistics/shipments/:id - Eliminar envío");
    info!("   POST /api/logistics/shipments/:id/assign-vehicle-driver - Asignar vehículo y conductor");
    info!("   POST /api/logistics/shipments/:id/start-transit - Iniciar tránsito");
    info!("   POST /api/logistics/shipments/:id/complete-delivery - Completar entrega");
    info!("   POST /api/logistics/shipments/:id/tracking - Registrar evento de tracking");
    info!("   GET  /api/logistics/shipments/:id/tracking - Historial de tracking");
    info!("   POST /api/logistics/shipments/:id/route-stops - Agregar parada de ruta");
    info!("   GET  /api/logistics/shipments/:id/route-stops - Paradas de la ruta");
    info!("🧾 Endpoints - Invoices:");
    info!("   POST /api/logistics/invoices - Crear factura");
    info!("   GET  /api/logistics/invoices - Listar facturas");
    info!("   GET  /api/logistics/invoices/:id - Obtener factura");
    info!("   PUT  /api/logistics/invoices/:id - Actualizar factura");
    info!("   DELETE /api/logistics/invoices/:id - Eliminar factura");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
