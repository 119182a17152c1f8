//! Warehouse gRPC service: manufacturer and item CRUD plus order
//! preparation, backed by MongoDB.

pub mod config;
pub mod conversions;
pub mod server;
pub mod service;
