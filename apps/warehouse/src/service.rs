//! gRPC service implementation over the inventory domain.

use domain_inventory::{InventoryRepository, InventoryService, LogisticsApi, WarehouseError};
use rpc::warehouse::{
    self, warehouse_service_server::WarehouseService, DeleteResponse, FindItemsResponse,
    FindManufacturersResponse, GetByIdRequest, InsertResponse, ItemInput, ItemQuery,
    ManufacturerInput, ManufacturerQuery, PrepareOrderRequest, PrepareOrderResponse,
    UpdateItemByIdRequest, UpdateManufacturerByIdRequest, UpdateResponse,
};
use tonic::{Request, Response, Status};

use crate::conversions::{
    item_input_to_patch, item_query_to_filter, item_to_proto, manufacturer_input_to_patch,
    manufacturer_query_to_filter, manufacturer_to_proto, ordered_item_to_line, user_to_domain,
};

/// Map a domain failure onto a gRPC status, logging it once at the
/// boundary. The status message carries the original failure text.
fn into_status(err: WarehouseError) -> Status {
    tracing::error!(error = %err, "Request failed");
    match err {
        WarehouseError::NotFound(msg) => Status::not_found(msg),
        WarehouseError::Validation(msg) => Status::invalid_argument(msg),
        WarehouseError::Database(msg) => Status::internal(msg),
    }
}

pub struct WarehouseGrpc<R, L>
where
    R: InventoryRepository + 'static,
    L: LogisticsApi + 'static,
{
    service: InventoryService<R, L>,
}

impl<R, L> WarehouseGrpc<R, L>
where
    R: InventoryRepository + 'static,
    L: LogisticsApi + 'static,
{
    pub fn new(service: InventoryService<R, L>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<R, L> WarehouseService for WarehouseGrpc<R, L>
where
    R: InventoryRepository + 'static,
    L: LogisticsApi + 'static,
{
    async fn get_manufacturer_by_id(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<warehouse::Manufacturer>, Status> {
        let req = request.into_inner();
        let id = domain_inventory::parse_object_id(&req.id).map_err(into_status)?;
        let record = self
            .service
            .get_manufacturer_by_id(id)
            .await
            .map_err(into_status)?;
        Ok(Response::new(manufacturer_to_proto(record)))
    }

    async fn find_manufacturers(
        &self,
        request: Request<ManufacturerQuery>,
    ) -> Result<Response<FindManufacturersResponse>, Status> {
        let filter = manufacturer_query_to_filter(request.into_inner()).map_err(into_status)?;
        let records = self
            .service
            .find_manufacturers(filter)
            .await
            .map_err(into_status)?;
        Ok(Response::new(FindManufacturersResponse {
            manufacturers: records.into_iter().map(manufacturer_to_proto).collect(),
        }))
    }

    async fn insert_manufacturer(
        &self,
        request: Request<ManufacturerInput>,
    ) -> Result<Response<InsertResponse>, Status> {
        let patch = manufacturer_input_to_patch(request.into_inner());
        let id = self
            .service
            .insert_manufacturer(patch)
            .await
            .map_err(into_status)?;
        Ok(Response::new(InsertResponse { id: id.to_hex() }))
    }

    async fn update_manufacturer_by_id(
        &self,
        request: Request<UpdateManufacturerByIdRequest>,
    ) -> Result<Response<UpdateResponse>, Status> {
        let req = request.into_inner();
        let id = domain_inventory::parse_object_id(&req.id).map_err(into_status)?;
        let patch = manufacturer_input_to_patch(req.manufacturer.unwrap_or_default());
        self.service
            .update_manufacturer_by_id(id, patch)
            .await
            .map_err(into_status)?;
        Ok(Response::new(UpdateResponse {}))
    }

    async fn delete_manufacturer(
        &self,
        request: Request<ManufacturerQuery>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let filter = manufacturer_query_to_filter(request.into_inner()).map_err(into_status)?;
        self.service
            .delete_manufacturer(filter)
            .await
            .map_err(into_status)?;
        Ok(Response::new(DeleteResponse {}))
    }

    async fn get_item_by_id(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<warehouse::Item>, Status> {
        let req = request.into_inner();
        let id = domain_inventory::parse_object_id(&req.id).map_err(into_status)?;
        let record = self.service.get_item_by_id(id).await.map_err(into_status)?;
        Ok(Response::new(item_to_proto(record)))
    }

    async fn find_items(
        &self,
        request: Request<ItemQuery>,
    ) -> Result<Response<FindItemsResponse>, Status> {
        let filter = item_query_to_filter(request.into_inner()).map_err(into_status)?;
        let records = self.service.find_items(filter).await.map_err(into_status)?;
        Ok(Response::new(FindItemsResponse {
            items: records.into_iter().map(item_to_proto).collect(),
        }))
    }

    async fn insert_item(
        &self,
        request: Request<ItemInput>,
    ) -> Result<Response<InsertResponse>, Status> {
        let patch = item_input_to_patch(request.into_inner()).map_err(into_status)?;
        let id = self.service.insert_item(patch).await.map_err(into_status)?;
        Ok(Response::new(InsertResponse { id: id.to_hex() }))
    }

    async fn update_item_by_id(
        &self,
        request: Request<UpdateItemByIdRequest>,
    ) -> Result<Response<UpdateResponse>, Status> {
        let req = request.into_inner();
        let id = domain_inventory::parse_object_id(&req.id).map_err(into_status)?;
        let patch = item_input_to_patch(req.item.unwrap_or_default()).map_err(into_status)?;
        self.service
            .update_item_by_id(id, patch)
            .await
            .map_err(into_status)?;
        Ok(Response::new(UpdateResponse {}))
    }

    async fn delete_item(
        &self,
        request: Request<ItemQuery>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let filter = item_query_to_filter(request.into_inner()).map_err(into_status)?;
        self.service.delete_item(filter).await.map_err(into_status)?;
        Ok(Response::new(DeleteResponse {}))
    }

    async fn prepare_order(
        &self,
        request: Request<PrepareOrderRequest>,
    ) -> Result<Response<PrepareOrderResponse>, Status> {
        let req = request.into_inner();
        let user = req
            .user
            .map(user_to_domain)
            .ok_or_else(|| Status::invalid_argument("user is required"))?;
        let lines = req
            .items
            .iter()
            .map(ordered_item_to_line)
            .collect::<Result<Vec<_>, _>>()
            .map_err(into_status)?;
        self.service
            .prepare_order(user, lines)
            .await
            .map_err(into_status)?;
        Ok(Response::new(PrepareOrderResponse {}))
    }
}
