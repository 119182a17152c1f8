//! gRPC server initialization and lifecycle.
//!
//! Startup order matters: configuration and tracing first so connection
//! failures are visible, then MongoDB with retry (the database container
//! may still be starting), then collection validators, then the server
//! itself.

use domain_inventory::{HttpLogisticsClient, InventoryService, MongoInventoryRepository};
use eyre::{Result, WrapErr};
use rpc::warehouse::warehouse_service_server::WarehouseServiceServer;
use tonic::transport::Server;
use tonic_health::server::health_reporter;
use tracing::info;

use crate::config::Config;
use crate::service::WarehouseGrpc;

/// Run the warehouse gRPC server until it is shut down.
pub async fn run() -> Result<()> {
    let config = Config::from_env().wrap_err("Failed to load configuration")?;

    core_config::tracing::init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let client = database::mongodb::connect_from_config_with_retry(&config.mongodb, None)
        .await
        .wrap_err("Failed to connect to MongoDB")?;
    let health = database::mongodb::check_health_detailed(&client).await;
    if !health.healthy {
        eyre::bail!(
            "MongoDB health check failed: {}",
            health.message.unwrap_or_default()
        );
    }
    let db = client.database(config.mongodb.database());
    info!(
        response_time_ms = health.response_time_ms,
        "Connected to MongoDB database: {}",
        config.mongodb.database()
    );

    domain_inventory::init_collections(&db)
        .await
        .wrap_err("Failed to initialize collections")?;

    let repository = MongoInventoryRepository::new(db);
    let logistics = HttpLogisticsClient::new(config.logistics.order_endpoint());
    let service = InventoryService::new(repository, logistics);
    let grpc = WarehouseGrpc::new(service);

    let addr = config
        .server
        .socket_addr()
        .wrap_err("Invalid listen address")?;

    // Health service for Kubernetes probes
    let (mut health_reporter, health_service) = health_reporter();
    health_reporter
        .set_service_status(
            "warehouse.v1.WarehouseService",
            tonic_health::ServingStatus::Serving,
        )
        .await;
    health_reporter
        .set_service_status("", tonic_health::ServingStatus::Serving)
        .await;

    info!("WarehouseService listening on {}", addr);

    Server::builder()
        .add_service(health_service)
        .add_service(
            WarehouseServiceServer::new(grpc)
                .accept_compressed(tonic::codec::CompressionEncoding::Zstd)
                .send_compressed(tonic::codec::CompressionEncoding::Zstd),
        )
        .serve(addr)
        .await
        .wrap_err("gRPC server failed")?;

    Ok(())
}
