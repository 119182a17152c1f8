use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use crate::error::WarehouseResult;
use crate::models::{ItemRecord, ManufacturerRecord};

/// Data access for manufacturers and items.
///
/// Condition documents are exact-match filters that have already been
/// stripped of nulls; an empty document matches everything. Update and
/// delete methods report how many documents were touched so the caller can
/// decide whether the target existed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn get_manufacturer(&self, id: ObjectId) -> WarehouseResult<Option<ManufacturerRecord>>;

    async fn find_manufacturers(
        &self,
        conditions: Document,
    ) -> WarehouseResult<Vec<ManufacturerRecord>>;

    /// Insert a manufacturer document, returning the store-assigned id.
    async fn insert_manufacturer(&self, document: Document) -> WarehouseResult<ObjectId>;

    /// Apply `changes` as a `$set` to the manufacturer with the given id,
    /// returning the number of matched documents.
    async fn update_manufacturer(&self, id: ObjectId, changes: Document) -> WarehouseResult<u64>;

    /// Delete the first manufacturer matching `conditions`, returning the
    /// number of deleted documents.
    async fn delete_manufacturer(&self, conditions: Document) -> WarehouseResult<u64>;

    async fn get_item(&self, id: ObjectId) -> WarehouseResult<Option<ItemRecord>>;

    async fn find_items(&self, conditions: Document) -> WarehouseResult<Vec<ItemRecord>>;

    async fn insert_item(&self, document: Document) -> WarehouseResult<ObjectId>;

    async fn update_item(&self, id: ObjectId, changes: Document) -> WarehouseResult<u64>;

    async fn delete_item(&self, conditions: Document) -> WarehouseResult<u64>;

    /// Overwrite the stored quantity of an item. Used by order preparation
    /// after it has computed the remaining stock.
    async fn set_item_quantity(&self, id: ObjectId, quantity: i32) -> WarehouseResult<()>;
}
