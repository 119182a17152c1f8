//! Inventory Domain
//!
//! Manufacturer and item records stored in MongoDB, plus the order
//! preparation flow that reserves stock and hands the shipment off to the
//! logistics service.
//!
//! Layering follows the usual shape: a [`service::InventoryService`] holds
//! the business rules and delegates persistence to the
//! [`repository::InventoryRepository`] trait, implemented for MongoDB by
//! [`mongodb::MongoInventoryRepository`]. The logistics hand-off goes
//! through the [`logistics::LogisticsApi`] trait so it can be faked in
//! tests.

pub mod error;
pub mod logistics;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod sanitize;
pub mod service;

pub use error::{WarehouseError, WarehouseResult};
pub use logistics::{HttpLogisticsClient, LogisticsApi, OrderPayload, ShipmentLine};
pub use models::{
    parse_object_id, ItemFilter, ItemPatch, ItemRecord, ManufacturerFilter, ManufacturerPatch,
    ManufacturerRecord, OrderUser, OrderedLine,
};
pub use mongodb::{init_collections, MongoInventoryRepository};
pub use repository::InventoryRepository;
pub use service::InventoryService;
