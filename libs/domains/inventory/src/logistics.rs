//! Hand-off of prepared orders to the logistics service.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{WarehouseError, WarehouseResult};
use crate::models::{ItemRecord, OrderUser};

/// Parcel dimensions are not tracked per item yet, so every shipment line
/// goes out with these placeholder measurements.
const LINE_HEIGHT: i32 = 10;
const LINE_LENGTH: i32 = 10;
const LINE_WIDTH: i32 = 10;
const LINE_WEIGHT: i32 = 100;

/// One reserved line of a shipment as the logistics service expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentLine {
    pub id: String,
    pub height: i32,
    pub length: i32,
    pub width: i32,
    pub price: f64,
    pub quantity: i32,
    pub weight: i32,
}

impl ShipmentLine {
    pub fn for_item(item: &ItemRecord, quantity: i32) -> Self {
        Self {
            id: item.id.to_hex(),
            height: LINE_HEIGHT,
            length: LINE_LENGTH,
            width: LINE_WIDTH,
            price: item.price,
            quantity,
            weight: LINE_WEIGHT,
        }
    }
}

/// Body POSTed to the logistics order endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub user: OrderUser,
    pub order: Vec<ShipmentLine>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogisticsApi: Send + Sync {
    async fn send_order(&self, payload: OrderPayload) -> WarehouseResult<()>;
}

/// HTTP client for the logistics service.
pub struct HttpLogisticsClient {
    client: reqwest::Client,
    order_endpoint: String,
}

impl HttpLogisticsClient {
    pub fn new(order_endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            order_endpoint: order_endpoint.into(),
        }
    }
}

#[async_trait]
impl LogisticsApi for HttpLogisticsClient {
    async fn send_order(&self, payload: OrderPayload) -> WarehouseResult<()> {
        self.client
            .post(&self.order_endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| WarehouseError::Database(e.to_string()))?
            .error_for_status()
            .map_err(|e| WarehouseError::Database(e.to_string()))?;
        tracing::info!(endpoint = %self.order_endpoint, "Order forwarded to logistics");
        Ok(())
    }
}
