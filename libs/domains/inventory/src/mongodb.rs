//! MongoDB implementation of [`InventoryRepository`].

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::{Collection, Database};
use tracing::instrument;

use crate::error::{WarehouseError, WarehouseResult};
use crate::models::{ItemRecord, ManufacturerRecord};
use crate::repository::InventoryRepository;

const MANUFACTURERS: &str = "manufacturers";
const ITEMS: &str = "items";

/// MongoDB server error code for "collection already exists".
const NAMESPACE_EXISTS: i32 = 48;

/// Create the inventory collections with their `$jsonSchema` validators.
///
/// Safe to call on every startup: collections that already exist are left
/// as they are.
pub async fn init_collections(db: &Database) -> WarehouseResult<()> {
    create_with_validator(db, MANUFACTURERS, manufacturer_schema()).await?;
    create_with_validator(db, ITEMS, item_schema()).await?;
    Ok(())
}

async fn create_with_validator(
    db: &Database,
    name: &str,
    schema: Document,
) -> WarehouseResult<()> {
    let result = db
        .create_collection(name)
        .validator(doc! { "$jsonSchema": schema })
        .await;
    match result {
        Ok(()) => {
            tracing::info!(collection = name, "Collection created");
            Ok(())
        }
        Err(err) if is_namespace_exists(&err) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(command) if command.code == NAMESPACE_EXISTS)
}

fn manufacturer_schema() -> Document {
    doc! {
        "bsonType": "object",
        "required": ["name"],
        "properties": {
            "name": { "bsonType": "string", "minLength": 1 },
            "address": { "bsonType": "string" },
            "phoneNumber": { "bsonType": "string" },
        },
    }
}

fn item_schema() -> Document {
    doc! {
        "bsonType": "object",
        "required": ["name", "price", "arrivalDate", "quantity"],
        "properties": {
            "name": { "bsonType": "string", "minLength": 1 },
            "manufacturer": { "bsonType": "objectId" },
            "price": { "bsonType": ["double", "int", "long"], "minimum": 0 },
            "arrivalDate": { "bsonType": "date" },
            "quantity": { "bsonType": "int" },
        },
    }
}

pub struct MongoInventoryRepository {
    db: Database,
}

impl MongoInventoryRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn manufacturers(&self) -> Collection<ManufacturerRecord> {
        self.db.collection(MANUFACTURERS)
    }

    fn items(&self) -> Collection<ItemRecord> {
        self.db.collection(ITEMS)
    }

    // Raw handles are used for writes built from client-supplied documents.
    fn manufacturers_raw(&self) -> Collection<Document> {
        self.db.collection(MANUFACTURERS)
    }

    fn items_raw(&self) -> Collection<Document> {
        self.db.collection(ITEMS)
    }
}

fn inserted_object_id(inserted_id: Bson) -> WarehouseResult<ObjectId> {
    match inserted_id {
        Bson::ObjectId(id) => Ok(id),
        other => Err(WarehouseError::Database(format!(
            "store returned a non-ObjectId insert id: {other}"
        ))),
    }
}

#[async_trait]
impl InventoryRepository for MongoInventoryRepository {
    #[instrument(skip(self))]
    async fn get_manufacturer(&self, id: ObjectId) -> WarehouseResult<Option<ManufacturerRecord>> {
        let record = self.manufacturers().find_one(doc! { "_id": id }).await?;
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_manufacturers(
        &self,
        conditions: Document,
    ) -> WarehouseResult<Vec<ManufacturerRecord>> {
        let cursor = self.manufacturers().find(conditions).await?;
        let records = cursor.try_collect().await?;
        Ok(records)
    }

    #[instrument(skip(self, document))]
    async fn insert_manufacturer(&self, document: Document) -> WarehouseResult<ObjectId> {
        let result = self.manufacturers_raw().insert_one(document).await?;
        let id = inserted_object_id(result.inserted_id)?;
        tracing::info!(manufacturer_id = %id, "Manufacturer inserted");
        Ok(id)
    }

    #[instrument(skip(self, changes))]
    async fn update_manufacturer(&self, id: ObjectId, changes: Document) -> WarehouseResult<u64> {
        let result = self
            .manufacturers_raw()
            .update_one(doc! { "_id": id }, doc! { "$set": changes })
            .await?;
        Ok(result.matched_count)
    }

    #[instrument(skip(self))]
    async fn delete_manufacturer(&self, conditions: Document) -> WarehouseResult<u64> {
        let result = self.manufacturers_raw().delete_one(conditions).await?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn get_item(&self, id: ObjectId) -> WarehouseResult<Option<ItemRecord>> {
        let record = self.items().find_one(doc! { "_id": id }).await?;
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_items(&self, conditions: Document) -> WarehouseResult<Vec<ItemRecord>> {
        let cursor = self.items().find(conditions).await?;
        let records = cursor.try_collect().await?;
        Ok(records)
    }

    #[instrument(skip(self, document))]
    async fn insert_item(&self, document: Document) -> WarehouseResult<ObjectId> {
        let result = self.items_raw().insert_one(document).await?;
        let id = inserted_object_id(result.inserted_id)?;
        tracing::info!(item_id = %id, "Item inserted");
        Ok(id)
    }

    #[instrument(skip(self, changes))]
    async fn update_item(&self, id: ObjectId, changes: Document) -> WarehouseResult<u64> {
        let result = self
            .items_raw()
            .update_one(doc! { "_id": id }, doc! { "$set": changes })
            .await?;
        Ok(result.matched_count)
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, conditions: Document) -> WarehouseResult<u64> {
        let result = self.items_raw().delete_one(conditions).await?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn set_item_quantity(&self, id: ObjectId, quantity: i32) -> WarehouseResult<()> {
        self.items_raw()
            .update_one(doc! { "_id": id }, doc! { "$set": { "quantity": quantity } })
            .await?;
        Ok(())
    }
}
