//! Tests of the gRPC surface end to end, with in-memory fakes standing in
//! for MongoDB and the logistics service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain_inventory::{
    InventoryRepository, InventoryService, ItemRecord, LogisticsApi, ManufacturerRecord,
    OrderPayload, WarehouseError, WarehouseResult,
};
use mongodb::bson::{self, oid::ObjectId, Document};
use rpc::warehouse as proto;
use rpc::warehouse::warehouse_service_server::WarehouseService;
use tonic::{Code, Request};
use warehouse::service::WarehouseGrpc;

fn record_matches(record: &Document, conditions: &Document) -> bool {
    conditions
        .iter()
        .all(|(key, value)| record.get(key) == Some(value))
}

#[derive(Default)]
struct FakeState {
    manufacturers: HashMap<ObjectId, ManufacturerRecord>,
    items: HashMap<ObjectId, ItemRecord>,
}

#[derive(Default, Clone)]
struct FakeRepository {
    state: Arc<Mutex<FakeState>>,
}

impl FakeRepository {
    fn item_quantity(&self, id: ObjectId) -> i32 {
        self.state.lock().unwrap().items[&id].quantity
    }
}

#[async_trait]
impl InventoryRepository for FakeRepository {
    async fn get_manufacturer(&self, id: ObjectId) -> WarehouseResult<Option<ManufacturerRecord>> {
        Ok(self.state.lock().unwrap().manufacturers.get(&id).cloned())
    }

    async fn find_manufacturers(
        &self,
        conditions: Document,
    ) -> WarehouseResult<Vec<ManufacturerRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .manufacturers
            .values()
            .filter(|r| record_matches(&bson::to_document(r).unwrap(), &conditions))
            .cloned()
            .collect())
    }

    async fn insert_manufacturer(&self, mut document: Document) -> WarehouseResult<ObjectId> {
        if document.get_str("name").is_err() {
            return Err(WarehouseError::Validation(
                "Document failed validation".to_string(),
            ));
        }
        let id = ObjectId::new();
        document.insert("_id", id);
        let record = bson::from_document(document).unwrap();
        self.state.lock().unwrap().manufacturers.insert(id, record);
        Ok(id)
    }

    async fn update_manufacturer(&self, id: ObjectId, changes: Document) -> WarehouseResult<u64> {
        let mut state = self.state.lock().unwrap();
        let Some(existing) = state.manufacturers.get(&id) else {
            return Ok(0);
        };
        let mut document = bson::to_document(existing).unwrap();
        for (key, value) in changes {
            document.insert(key, value);
        }
        state.manufacturers.insert(id, bson::from_document(document).unwrap());
        Ok(1)
    }

    async fn delete_manufacturer(&self, conditions: Document) -> WarehouseResult<u64> {
        let mut state = self.state.lock().unwrap();
        let target = state
            .manufacturers
            .iter()
            .find(|(_, r)| record_matches(&bson::to_document(r).unwrap(), &conditions))
            .map(|(id, _)| *id);
        match target {
            Some(id) => {
                state.manufacturers.remove(&id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn get_item(&self, id: ObjectId) -> WarehouseResult<Option<ItemRecord>> {
        Ok(self.state.lock().unwrap().items.get(&id).cloned())
    }

    async fn find_items(&self, conditions: Document) -> WarehouseResult<Vec<ItemRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .values()
            .filter(|r| record_matches(&bson::to_document(r).unwrap(), &conditions))
            .cloned()
            .collect())
    }

    async fn insert_item(&self, mut document: Document) -> WarehouseResult<ObjectId> {
        if document.get_str("name").is_err() || document.get_datetime("arrivalDate").is_err() {
            return Err(WarehouseError::Validation(
                "Document failed validation".to_string(),
            ));
        }
        let id = ObjectId::new();
        document.insert("_id", id);
        let record = bson::from_document(document).unwrap();
        self.state.lock().unwrap().items.insert(id, record);
        Ok(id)
    }

    async fn update_item(&self, id: ObjectId, changes: Document) -> WarehouseResult<u64> {
        let mut state = self.state.lock().unwrap();
        let Some(existing) = state.items.get(&id) else {
            return Ok(0);
        };
        let mut document = bson::to_document(existing).unwrap();
        for (key, value) in changes {
            document.insert(key, value);
        }
        state.items.insert(id, bson::from_document(document).unwrap());
        Ok(1)
    }

    async fn delete_item(&self, conditions: Document) -> WarehouseResult<u64> {
        let mut state = self.state.lock().unwrap();
        let target = state
            .items
            .iter()
            .find(|(_, r)| record_matches(&bson::to_document(r).unwrap(), &conditions))
            .map(|(id, _)| *id);
        match target {
            Some(id) => {
                state.items.remove(&id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_item_quantity(&self, id: ObjectId, quantity: i32) -> WarehouseResult<()> {
        if let Some(item) = self.state.lock().unwrap().items.get_mut(&id) {
            item.quantity = quantity;
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
struct FakeLogistics {
    sent: Arc<Mutex<Vec<OrderPayload>>>,
}

#[async_trait]
impl LogisticsApi for FakeLogistics {
    async fn send_order(&self, payload: OrderPayload) -> WarehouseResult<()> {
        self.sent.lock().unwrap().push(payload);
        Ok(())
    }
}

fn setup() -> (
    WarehouseGrpc<FakeRepository, FakeLogistics>,
    FakeRepository,
    FakeLogistics,
) {
    let repo = FakeRepository::default();
    let logistics = FakeLogistics::default();
    let grpc = WarehouseGrpc::new(InventoryService::new(repo.clone(), logistics.clone()));
    (grpc, repo, logistics)
}

async fn insert_item(
    grpc: &WarehouseGrpc<FakeRepository, FakeLogistics>,
    name: &str,
    price: f64,
    quantity: i32,
) -> String {
    grpc.insert_item(Request::new(proto::ItemInput {
        name: Some(name.to_string()),
        price: Some(price),
        quantity: Some(quantity),
        arrival_date: Some(1_700_000_000_000),
        ..Default::default()
    }))
    .await
    .unwrap()
    .into_inner()
    .id
}

#[tokio::test]
async fn insert_and_get_manufacturer() {
    let (grpc, _, _) = setup();

    let id = grpc
        .insert_manufacturer(Request::new(proto::ManufacturerInput {
            name: Some("Acme".to_string()),
            address: Some("1 Main St".to_string()),
            phone_number: None,
        }))
        .await
        .unwrap()
        .into_inner()
        .id;

    let fetched = grpc
        .get_manufacturer_by_id(Request::new(proto::GetByIdRequest { id: id.clone() }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(fetched.id, id);
    assert_eq!(fetched.name, "Acme");
    assert_eq!(fetched.address.as_deref(), Some("1 Main St"));
    assert_eq!(fetched.phone_number, None);
}

#[tokio::test]
async fn malformed_id_maps_to_internal() {
    let (grpc, _, _) = setup();

    let status = grpc
        .get_manufacturer_by_id(Request::new(proto::GetByIdRequest {
            id: "not-a-hex-id".to_string(),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::Internal);
}

#[tokio::test]
async fn missing_manufacturer_maps_to_not_found() {
    let (grpc, _, _) = setup();
    let id = ObjectId::new();

    let status = grpc
        .get_manufacturer_by_id(Request::new(proto::GetByIdRequest { id: id.to_hex() }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(
        status.message(),
        format!("Manufacturer with id {} wasn't found.", id.to_hex())
    );
}

#[tokio::test]
async fn empty_name_maps_to_invalid_argument() {
    let (grpc, _, _) = setup();

    let status = grpc
        .insert_manufacturer(Request::new(proto::ManufacturerInput {
            name: Some(String::new()),
            ..Default::default()
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn find_with_no_matches_maps_to_not_found() {
    let (grpc, _, _) = setup();

    let status = grpc
        .find_items(Request::new(proto::ItemQuery::default()))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "No items found.");
}

#[tokio::test]
async fn item_update_and_delete_round_trip() {
    let (grpc, _, _) = setup();
    let id = insert_item(&grpc, "Widget", 19.99, 10).await;

    let fetched = grpc
        .get_item_by_id(Request::new(proto::GetByIdRequest { id: id.clone() }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched.price, 19.99);
    assert_eq!(fetched.arrival_date, 1_700_000_000_000);

    grpc.update_item_by_id(Request::new(proto::UpdateItemByIdRequest {
        id: id.clone(),
        item: Some(proto::ItemInput {
            quantity: Some(4),
            ..Default::default()
        }),
    }))
    .await
    .unwrap();

    let updated = grpc
        .get_item_by_id(Request::new(proto::GetByIdRequest { id: id.clone() }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(updated.quantity, 4);
    // Untouched fields survive a partial update.
    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.price, 19.99);

    grpc.delete_item(Request::new(proto::ItemQuery {
        id: Some(id.clone()),
        ..Default::default()
    }))
    .await
    .unwrap();

    let status = grpc
        .delete_item(Request::new(proto::ItemQuery {
            id: Some(id),
            ..Default::default()
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "Item with specified conditions wasn't found.");
}

#[tokio::test]
async fn find_items_by_name() {
    let (grpc, _, _) = setup();
    insert_item(&grpc, "Widget", 1.0, 5).await;
    insert_item(&grpc, "Gadget", 2.0, 5).await;

    let found = grpc
        .find_items(Request::new(proto::ItemQuery {
            name: Some("Widget".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].name, "Widget");
}

#[tokio::test]
async fn prepare_order_reserves_stock_and_forwards_shipment() {
    let (grpc, repo, logistics) = setup();
    let id = insert_item(&grpc, "Widget", 19.99, 10).await;

    grpc.prepare_order(Request::new(proto::PrepareOrderRequest {
        user: Some(proto::User {
            id: "u1".to_string(),
            name: Some("Jane".to_string()),
            middle_name: None,
            surname: Some("Doe".to_string()),
            address: Some("1 Main St".to_string()),
        }),
        items: vec![proto::OrderedItem {
            id: id.clone(),
            quantity: 3,
        }],
    }))
    .await
    .unwrap();

    let object_id = ObjectId::parse_str(&id).unwrap();
    assert_eq!(repo.item_quantity(object_id), 7);

    let sent = logistics.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user.id, "u1");
    assert_eq!(sent[0].order.len(), 1);
    assert_eq!(sent[0].order[0].id, id);
    assert_eq!(sent[0].order[0].quantity, 3);
    assert_eq!(sent[0].order[0].price, 19.99);
}

#[tokio::test]
async fn prepare_order_without_user_is_invalid_argument() {
    let (grpc, _, _) = setup();

    let status = grpc
        .prepare_order(Request::new(proto::PrepareOrderRequest {
            user: None,
            items: vec![],
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn prepare_order_with_unknown_item_sends_nothing() {
    let (grpc, _, logistics) = setup();
    let missing = ObjectId::new();

    let status = grpc
        .prepare_order(Request::new(proto::PrepareOrderRequest {
            user: Some(proto::User {
                id: "u1".to_string(),
                name: None,
                middle_name: None,
                surname: None,
                address: None,
            }),
            items: vec![proto::OrderedItem {
                id: missing.to_hex(),
                quantity: 1,
            }],
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert!(logistics.sent.lock().unwrap().is_empty());
}
