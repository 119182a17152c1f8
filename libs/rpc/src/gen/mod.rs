// @generated
// This file wires up the generated protobuf code
// Note: The prost files already include!() the tonic files automatically

pub mod warehouse {
    include!("warehouse.v1.rs");
    // warehouse.v1.tonic.rs is auto-included by warehouse.v1.rs
}
