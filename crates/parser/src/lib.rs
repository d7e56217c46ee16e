//! Schema parsing for protoc-gen-twirp_flow
//!
//! This crate turns compiled protobuf descriptors into the registry of
//! models and services the generator renders from.
//!
//! ## Extraction Rules
//!
//! - `google/protobuf/timestamp.proto` is never extracted; fields of type
//!   `google.protobuf.Timestamp` become the `Date` primitive
//! - every top-level message becomes a model, one field per declared field
//! - every service becomes a service, one method per unary RPC
//! - output file names replace the `.proto` extension with `.js`

pub mod naming;
mod protobuf;
mod type_mapper;

pub use protobuf::{ProtobufParser, TIMESTAMP_FILE};
pub use type_mapper::{MappedType, TypeMapper, TIMESTAMP_FULL_NAME};
