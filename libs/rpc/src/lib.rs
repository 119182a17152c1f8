//! Generated protobuf/tonic code for the warehouse RPC surface.
//!
//! The source of truth lives in `proto/`; the code under `src/gen/` is
//! generated out-of-band and committed.

mod gen;

pub use gen::*;
