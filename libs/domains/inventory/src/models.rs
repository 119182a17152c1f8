use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{WarehouseError, WarehouseResult};

/// Manufacturer document as stored in the `manufacturers` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Item document as stored in the `items` collection. `manufacturer` is a
/// reference into the manufacturers collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<ObjectId>,
    pub price: f64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub arrival_date: DateTime<Utc>,
    pub quantity: i32,
}

/// Fields for inserting or updating a manufacturer. Absent fields serialize
/// to BSON null and are stripped before hitting the store, so an update
/// leaves them unchanged.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerPatch {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Fields for inserting or updating an item.
///
/// `arrival_date` is excluded from serialization because it needs to land
/// in the store as a BSON datetime; the service inserts it into the
/// document explicitly.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub manufacturer: Option<ObjectId>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[serde(skip)]
    pub arrival_date: Option<DateTime<Utc>>,
    pub quantity: Option<i32>,
}

/// Exact-match conditions for finding or deleting manufacturers. Absent
/// fields serialize to BSON null and are stripped, so an empty filter
/// matches everything.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerFilter {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Exact-match conditions for finding or deleting items.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: Option<String>,
    pub manufacturer: Option<ObjectId>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

/// Customer identity forwarded to the logistics service with an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUser {
    pub id: String,
    pub name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub address: Option<String>,
}

/// One line of an order: which item and how many units.
#[derive(Debug, Clone, Copy)]
pub struct OrderedLine {
    pub item_id: ObjectId,
    pub quantity: i32,
}

/// Parse a 24-character hex string into an [`ObjectId`].
pub fn parse_object_id(id: &str) -> WarehouseResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|e| WarehouseError::Database(e.to_string()))
}
