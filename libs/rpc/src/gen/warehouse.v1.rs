// @generated
/// 24-character hex ObjectId.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetByIdRequest {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Manufacturer {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, optional, tag="3")]
    pub address: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="4")]
    pub phone_number: ::core::option::Option<::prost::alloc::string::String>,
}
/// Fields for insert/update; absent fields are left to store defaults on
/// insert and left unchanged on update.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ManufacturerInput {
    #[prost(string, optional, tag="1")]
    pub name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="2")]
    pub address: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="3")]
    pub phone_number: ::core::option::Option<::prost::alloc::string::String>,
}
/// Partial-match conditions for find/delete.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ManufacturerQuery {
    #[prost(string, optional, tag="1")]
    pub id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="2")]
    pub name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="3")]
    pub address: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="4")]
    pub phone_number: ::core::option::Option<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FindManufacturersResponse {
    #[prost(message, repeated, tag="1")]
    pub manufacturers: ::prost::alloc::vec::Vec<Manufacturer>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateManufacturerByIdRequest {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(message, optional, tag="2")]
    pub manufacturer: ::core::option::Option<ManufacturerInput>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Item {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, optional, tag="3")]
    pub manufacturer_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(double, tag="4")]
    pub price: f64,
    /// Milliseconds since the UNIX epoch, UTC.
    #[prost(int64, tag="5")]
    pub arrival_date: i64,
    #[prost(int32, tag="6")]
    pub quantity: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ItemInput {
    #[prost(string, optional, tag="1")]
    pub name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="2")]
    pub manufacturer_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(double, optional, tag="3")]
    pub price: ::core::option::Option<f64>,
    /// Defaults to insertion time when absent on insert.
    #[prost(int64, optional, tag="4")]
    pub arrival_date: ::core::option::Option<i64>,
    #[prost(int32, optional, tag="5")]
    pub quantity: ::core::option::Option<i32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ItemQuery {
    #[prost(string, optional, tag="1")]
    pub id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="2")]
    pub name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="3")]
    pub manufacturer_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(double, optional, tag="4")]
    pub price: ::core::option::Option<f64>,
    #[prost(int32, optional, tag="5")]
    pub quantity: ::core::option::Option<i32>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FindItemsResponse {
    #[prost(message, repeated, tag="1")]
    pub items: ::prost::alloc::vec::Vec<Item>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateItemByIdRequest {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(message, optional, tag="2")]
    pub item: ::core::option::Option<ItemInput>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InsertResponse {
    /// Store-assigned identifier of the new document, as hex.
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UpdateResponse {
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeleteResponse {
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, optional, tag="2")]
    pub name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="3")]
    pub middle_name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="4")]
    pub surname: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag="5")]
    pub address: ::core::option::Option<::prost::alloc::string::String>,
}
/// One ordered line: item identifier plus requested quantity.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OrderedItem {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(int32, tag="2")]
    pub quantity: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PrepareOrderRequest {
    #[prost(message, optional, tag="1")]
    pub user: ::core::option::Option<User>,
    #[prost(message, repeated, tag="2")]
    pub items: ::prost::alloc::vec::Vec<OrderedItem>,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PrepareOrderResponse {
}
include!("warehouse.v1.tonic.rs");
// @@protoc_insertion_point(module)
