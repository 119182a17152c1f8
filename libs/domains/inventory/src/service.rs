//! Inventory business logic.

use std::sync::Arc;

use futures::future::try_join_all;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, DateTime as BsonDateTime, Document};
use serde::Serialize;
use tracing::instrument;
use validator::Validate;

use crate::error::{WarehouseError, WarehouseResult};
use crate::logistics::{LogisticsApi, OrderPayload, ShipmentLine};
use crate::models::{
    ItemFilter, ItemPatch, ItemRecord, ManufacturerFilter, ManufacturerPatch, ManufacturerRecord,
    OrderUser, OrderedLine,
};
use crate::repository::InventoryRepository;
use crate::sanitize::strip_nulls;

/// Serialize a DTO into a BSON document and drop the nulls its absent
/// optional fields produce.
fn sanitized_document<T: Serialize>(value: &T) -> WarehouseResult<Document> {
    let mut document = bson::to_document(value)?;
    strip_nulls(&mut document);
    Ok(document)
}

pub struct InventoryService<R: InventoryRepository, L: LogisticsApi> {
    repository: Arc<R>,
    logistics: Arc<L>,
}

impl<R, L> InventoryService<R, L>
where
    R: InventoryRepository,
    L: LogisticsApi,
{
    pub fn new(repository: R, logistics: L) -> Self {
        Self {
            repository: Arc::new(repository),
            logistics: Arc::new(logistics),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_manufacturer_by_id(
        &self,
        id: ObjectId,
    ) -> WarehouseResult<ManufacturerRecord> {
        self.repository
            .get_manufacturer(id)
            .await?
            .ok_or_else(|| {
                WarehouseError::NotFound(format!(
                    "Manufacturer with id {} wasn't found.",
                    id.to_hex()
                ))
            })
    }

    #[instrument(skip(self))]
    pub async fn find_manufacturers(
        &self,
        filter: ManufacturerFilter,
    ) -> WarehouseResult<Vec<ManufacturerRecord>> {
        let conditions = sanitized_document(&filter)?;
        let records = self.repository.find_manufacturers(conditions).await?;
        if records.is_empty() {
            return Err(WarehouseError::NotFound("No manufacturers found.".to_string()));
        }
        Ok(records)
    }

    #[instrument(skip(self, input))]
    pub async fn insert_manufacturer(
        &self,
        input: ManufacturerPatch,
    ) -> WarehouseResult<ObjectId> {
        input
            .validate()
            .map_err(|e| WarehouseError::Validation(e.to_string()))?;
        let document = sanitized_document(&input)?;
        self.repository.insert_manufacturer(document).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_manufacturer_by_id(
        &self,
        id: ObjectId,
        input: ManufacturerPatch,
    ) -> WarehouseResult<()> {
        input
            .validate()
            .map_err(|e| WarehouseError::Validation(e.to_string()))?;
        let changes = sanitized_document(&input)?;
        let matched = self.repository.update_manufacturer(id, changes).await?;
        if matched == 0 {
            return Err(WarehouseError::NotFound(format!(
                "Manufacturer with id {} wasn't found.",
                id.to_hex()
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_manufacturer(&self, filter: ManufacturerFilter) -> WarehouseResult<()> {
        let conditions = sanitized_document(&filter)?;
        let deleted = self.repository.delete_manufacturer(conditions).await?;
        if deleted == 0 {
            return Err(WarehouseError::NotFound(
                "Manufacturer with specified conditions wasn't found.".to_string(),
            ));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_item_by_id(&self, id: ObjectId) -> WarehouseResult<ItemRecord> {
        self.repository.get_item(id).await?.ok_or_else(|| {
            WarehouseError::NotFound(format!("Item with id {} wasn't found.", id.to_hex()))
        })
    }

    #[instrument(skip(self))]
    pub async fn find_items(&self, filter: ItemFilter) -> WarehouseResult<Vec<ItemRecord>> {
        let conditions = sanitized_document(&filter)?;
        let records = self.repository.find_items(conditions).await?;
        if records.is_empty() {
            return Err(WarehouseError::NotFound("No items found.".to_string()));
        }
        Ok(records)
    }

    /// Insert an item. `arrival_date` defaults to the insertion time when
    /// absent, so the stored document always satisfies the collection
    /// validator's date requirement.
    #[instrument(skip(self, input))]
    pub async fn insert_item(&self, input: ItemPatch) -> WarehouseResult<ObjectId> {
        input
            .validate()
            .map_err(|e| WarehouseError::Validation(e.to_string()))?;
        let mut document = sanitized_document(&input)?;
        let arrival = input.arrival_date.unwrap_or_else(chrono::Utc::now);
        document.insert("arrivalDate", BsonDateTime::from_chrono(arrival));
        self.repository.insert_item(document).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_item_by_id(&self, id: ObjectId, input: ItemPatch) -> WarehouseResult<()> {
        input
            .validate()
            .map_err(|e| WarehouseError::Validation(e.to_string()))?;
        let mut changes = sanitized_document(&input)?;
        if let Some(arrival) = input.arrival_date {
            changes.insert("arrivalDate", BsonDateTime::from_chrono(arrival));
        }
        let matched = self.repository.update_item(id, changes).await?;
        if matched == 0 {
            return Err(WarehouseError::NotFound(format!(
                "Item with id {} wasn't found.",
                id.to_hex()
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, filter: ItemFilter) -> WarehouseResult<()> {
        let conditions = sanitized_document(&filter)?;
        let deleted = self.repository.delete_item(conditions).await?;
        if deleted == 0 {
            return Err(WarehouseError::NotFound(
                "Item with specified conditions wasn't found.".to_string(),
            ));
        }
        Ok(())
    }

    /// Reserve stock for every ordered line, then forward the shipment to
    /// the logistics service.
    ///
    /// Lines are reserved concurrently and each decrement is persisted as
    /// soon as its item is looked up. There is no rollback: if one line
    /// fails, decrements that already landed stay in place and the order is
    /// not forwarded.
    #[instrument(skip(self, user, lines), fields(line_count = lines.len()))]
    pub async fn prepare_order(
        &self,
        user: OrderUser,
        lines: Vec<OrderedLine>,
    ) -> WarehouseResult<()> {
        let order = try_join_all(lines.iter().map(|line| self.reserve_line(*line))).await?;
        self.logistics.send_order(OrderPayload { user, order }).await
    }

    async fn reserve_line(&self, line: OrderedLine) -> WarehouseResult<ShipmentLine> {
        let item = self.repository.get_item(line.item_id).await?.ok_or_else(|| {
            WarehouseError::NotFound(format!(
                "Item with id {} wasn't found.",
                line.item_id.to_hex()
            ))
        })?;
        self.repository
            .set_item_quantity(line.item_id, item.quantity - line.quantity)
            .await?;
        Ok(ShipmentLine::for_item(&item, line.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logistics::MockLogisticsApi;
    use crate::repository::MockInventoryRepository;
    use mockall::predicate;

    fn service(
        repository: MockInventoryRepository,
        logistics: MockLogisticsApi,
    ) -> InventoryService<MockInventoryRepository, MockLogisticsApi> {
        InventoryService::new(repository, logistics)
    }

    fn manufacturer(id: ObjectId) -> ManufacturerRecord {
        ManufacturerRecord {
            id,
            name: "Acme".to_string(),
            address: None,
            phone_number: None,
        }
    }

    fn item(id: ObjectId, price: f64, quantity: i32) -> ItemRecord {
        ItemRecord {
            id,
            name: "Widget".to_string(),
            manufacturer: None,
            price,
            arrival_date: chrono::Utc::now(),
            quantity,
        }
    }

    fn user() -> OrderUser {
        OrderUser {
            id: "u1".to_string(),
            name: Some("Jane".to_string()),
            middle_name: None,
            surname: Some("Doe".to_string()),
            address: Some("1 Main St".to_string()),
        }
    }

    #[tokio::test]
    async fn get_manufacturer_reports_missing_id() {
        let id = ObjectId::new();
        let mut repo = MockInventoryRepository::new();
        repo.expect_get_manufacturer()
            .with(predicate::eq(id))
            .returning(|_| Ok(None));

        let svc = service(repo, MockLogisticsApi::new());
        let err = svc.get_manufacturer_by_id(id).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Manufacturer with id {} wasn't found.", id.to_hex())
        );
    }

    #[tokio::test]
    async fn find_manufacturers_with_no_matches_is_not_found() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_find_manufacturers().returning(|_| Ok(vec![]));

        let svc = service(repo, MockLogisticsApi::new());
        let err = svc
            .find_manufacturers(ManufacturerFilter::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No manufacturers found.");
    }

    #[tokio::test]
    async fn find_items_strips_absent_conditions() {
        let record = item(ObjectId::new(), 1.0, 1);
        let mut repo = MockInventoryRepository::new();
        repo.expect_find_items()
            .withf(|conditions| {
                conditions.len() == 1 && conditions.get_str("name") == Ok("Widget")
            })
            .returning(move |_| Ok(vec![record.clone()]));

        let svc = service(repo, MockLogisticsApi::new());
        let found = svc
            .find_items(ItemFilter {
                name: Some("Widget".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn insert_manufacturer_rejects_empty_name() {
        let svc = service(MockInventoryRepository::new(), MockLogisticsApi::new());
        let err = svc
            .insert_manufacturer(ManufacturerPatch {
                name: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, WarehouseError::Validation(_)));
    }

    #[tokio::test]
    async fn insert_manufacturer_omits_absent_fields() {
        let id = ObjectId::new();
        let mut repo = MockInventoryRepository::new();
        repo.expect_insert_manufacturer()
            .withf(|document| {
                document.len() == 1 && document.get_str("name") == Ok("Acme")
            })
            .returning(move |_| Ok(id));

        let svc = service(repo, MockLogisticsApi::new());
        let inserted = svc
            .insert_manufacturer(ManufacturerPatch {
                name: Some("Acme".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(inserted, id);
    }

    #[tokio::test]
    async fn insert_item_defaults_arrival_date() {
        let id = ObjectId::new();
        let mut repo = MockInventoryRepository::new();
        repo.expect_insert_item()
            .withf(|document| {
                document.get_datetime("arrivalDate").is_ok()
                    && document.get_str("name") == Ok("Widget")
            })
            .returning(move |_| Ok(id));

        let svc = service(repo, MockLogisticsApi::new());
        svc.insert_item(ItemPatch {
            name: Some("Widget".to_string()),
            price: Some(2.5),
            quantity: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn update_item_without_match_is_not_found() {
        let id = ObjectId::new();
        let mut repo = MockInventoryRepository::new();
        repo.expect_update_item()
            .with(predicate::eq(id), predicate::always())
            .returning(|_, _| Ok(0));

        let svc = service(repo, MockLogisticsApi::new());
        let err = svc
            .update_item_by_id(
                id,
                ItemPatch {
                    quantity: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Item with id {} wasn't found.", id.to_hex())
        );
    }

    #[tokio::test]
    async fn update_manufacturer_sends_only_provided_fields() {
        let id = ObjectId::new();
        let mut repo = MockInventoryRepository::new();
        repo.expect_update_manufacturer()
            .withf(|_, changes| {
                changes.len() == 1 && changes.get_str("phoneNumber") == Ok("555-0100")
            })
            .returning(|_, _| Ok(1));

        let svc = service(repo, MockLogisticsApi::new());
        svc.update_manufacturer_by_id(
            id,
            ManufacturerPatch {
                phone_number: Some("555-0100".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn delete_item_without_match_is_not_found() {
        let mut repo = MockInventoryRepository::new();
        repo.expect_delete_item().returning(|_| Ok(0));

        let svc = service(repo, MockLogisticsApi::new());
        let err = svc.delete_item(ItemFilter::default()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Item with specified conditions wasn't found."
        );
    }

    #[tokio::test]
    async fn prepare_order_decrements_stock_and_forwards_shipment() {
        let item_id = ObjectId::new();
        let record = item(item_id, 19.99, 10);

        let mut repo = MockInventoryRepository::new();
        repo.expect_get_item()
            .with(predicate::eq(item_id))
            .returning(move |_| Ok(Some(record.clone())));
        repo.expect_set_item_quantity()
            .with(predicate::eq(item_id), predicate::eq(7))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut logistics = MockLogisticsApi::new();
        logistics
            .expect_send_order()
            .withf(move |payload| {
                payload.user.id == "u1"
                    && payload.order.len() == 1
                    && payload.order[0].id == item_id.to_hex()
                    && payload.order[0].quantity == 3
                    && payload.order[0].price == 19.99
            })
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(repo, logistics);
        svc.prepare_order(
            user(),
            vec![OrderedLine {
                item_id,
                quantity: 3,
            }],
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn prepare_order_with_missing_item_skips_logistics() {
        let missing_id = ObjectId::new();
        let mut repo = MockInventoryRepository::new();
        repo.expect_get_item()
            .with(predicate::eq(missing_id))
            .returning(|_| Ok(None));

        let mut logistics = MockLogisticsApi::new();
        logistics.expect_send_order().times(0);

        let svc = service(repo, logistics);
        let err = svc
            .prepare_order(
                user(),
                vec![OrderedLine {
                    item_id: missing_id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Item with id {} wasn't found.", missing_id.to_hex())
        );
    }

    #[tokio::test]
    async fn prepare_order_keeps_earlier_decrements_on_failure() {
        let present_id = ObjectId::new();
        let missing_id = ObjectId::new();
        let record = item(present_id, 5.0, 8);

        let mut repo = MockInventoryRepository::new();
        repo.expect_get_item()
            .with(predicate::eq(present_id))
            .returning(move |_| Ok(Some(record.clone())));
        repo.expect_get_item()
            .with(predicate::eq(missing_id))
            .returning(|_| Ok(None));
        // Lines are reserved concurrently, so the surviving line's decrement
        // may or may not land before the failure aborts the join.
        repo.expect_set_item_quantity()
            .with(predicate::eq(present_id), predicate::eq(6))
            .times(0..=1)
            .returning(|_, _| Ok(()));

        let mut logistics = MockLogisticsApi::new();
        logistics.expect_send_order().times(0);

        let svc = service(repo, logistics);
        let err = svc
            .prepare_order(
                user(),
                vec![
                    OrderedLine {
                        item_id: present_id,
                        quantity: 2,
                    },
                    OrderedLine {
                        item_id: missing_id,
                        quantity: 1,
                    },
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, WarehouseError::NotFound(_)));
    }
}
