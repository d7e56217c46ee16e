//! Protobuf schema extraction
//!
//! Builds a descriptor pool from compiled `.proto` files and walks it file by
//! file into a [`ContextRegistry`](twirp_flow_common::ContextRegistry).
//!
//! ## Sources
//! - **CodeGeneratorRequest**: the `proto_file` list protoc hands to plugins
//! - **FileDescriptorSet**: `protoc --descriptor_set_out=... --include_imports`
//!
//! ## Example
//! ```rust,ignore
//! use twirp_flow_parser::ProtobufParser;
//!
//! let parser = ProtobufParser::from_file("service.pb")?;
//! let registry = parser.parse()?;
//! ```

mod converter;
mod parser;

pub use converter::TIMESTAMP_FILE;
pub use parser::ProtobufParser;
