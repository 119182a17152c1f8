//! Conversions between the wire types and the domain model.
//!
//! Identifiers travel as 24-character hex strings and dates as epoch
//! milliseconds; everything here is about crossing that boundary.

use chrono::{DateTime, Utc};
use domain_inventory::{
    parse_object_id, ItemFilter, ItemPatch, ItemRecord, ManufacturerFilter, ManufacturerPatch,
    ManufacturerRecord, OrderUser, OrderedLine, WarehouseError, WarehouseResult,
};
use mongodb::bson::oid::ObjectId;
use rpc::warehouse;

fn parse_optional_id(id: Option<&str>) -> WarehouseResult<Option<ObjectId>> {
    id.map(parse_object_id).transpose()
}

fn millis_to_datetime(millis: i64) -> WarehouseResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        WarehouseError::Validation(format!("arrival_date {millis} is out of range"))
    })
}

pub fn manufacturer_to_proto(record: ManufacturerRecord) -> warehouse::Manufacturer {
    warehouse::Manufacturer {
        id: record.id.to_hex(),
        name: record.name,
        address: record.address,
        phone_number: record.phone_number,
    }
}

pub fn item_to_proto(record: ItemRecord) -> warehouse::Item {
    warehouse::Item {
        id: record.id.to_hex(),
        name: record.name,
        manufacturer_id: record.manufacturer.map(|id| id.to_hex()),
        price: record.price,
        arrival_date: record.arrival_date.timestamp_millis(),
        quantity: record.quantity,
    }
}

pub fn manufacturer_input_to_patch(input: warehouse::ManufacturerInput) -> ManufacturerPatch {
    ManufacturerPatch {
        name: input.name,
        address: input.address,
        phone_number: input.phone_number,
    }
}

pub fn item_input_to_patch(input: warehouse::ItemInput) -> WarehouseResult<ItemPatch> {
    Ok(ItemPatch {
        name: input.name,
        manufacturer: parse_optional_id(input.manufacturer_id.as_deref())?,
        price: input.price,
        arrival_date: input.arrival_date.map(millis_to_datetime).transpose()?,
        quantity: input.quantity,
    })
}

pub fn manufacturer_query_to_filter(
    query: warehouse::ManufacturerQuery,
) -> WarehouseResult<ManufacturerFilter> {
    Ok(ManufacturerFilter {
        id: parse_optional_id(query.id.as_deref())?,
        name: query.name,
        address: query.address,
        phone_number: query.phone_number,
    })
}

pub fn item_query_to_filter(query: warehouse::ItemQuery) -> WarehouseResult<ItemFilter> {
    Ok(ItemFilter {
        id: parse_optional_id(query.id.as_deref())?,
        name: query.name,
        manufacturer: parse_optional_id(query.manufacturer_id.as_deref())?,
        price: query.price,
        quantity: query.quantity,
    })
}

pub fn user_to_domain(user: warehouse::User) -> OrderUser {
    OrderUser {
        id: user.id,
        name: user.name,
        middle_name: user.middle_name,
        surname: user.surname,
        address: user.address,
    }
}

pub fn ordered_item_to_line(item: &warehouse::OrderedItem) -> WarehouseResult<OrderedLine> {
    Ok(OrderedLine {
        item_id: parse_object_id(&item.id)?,
        quantity: item.quantity,
    })
}
