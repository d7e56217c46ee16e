//! Common types and utilities for protoc-gen-twirp_flow
//!
//! This crate contains the extracted data model (models, fields, services),
//! the two-phase context registry, plugin configuration and the error type
//! shared by the parser, generator, and CLI components.

mod config;
mod registry;

pub use config::{parse_parameters, GeneratorOptions, TwirpVersion};
pub use registry::{ContextRegistry, FileContext, RegistryBuilder};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during client generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// In-memory type of the synthetic primitive standing in for
/// `google.protobuf.Timestamp`
pub const DATE_TYPE: &str = "Date";

/// Suffix appended to a model name to form its wire-shape type
pub const JSON_SUFFIX: &str = "JSON";

/// Extension of every generated file
pub const OUTPUT_EXTENSION: &str = ".js";

const ARRAY_PREFIX: &str = "Array<";
const ARRAY_SUFFIX: &str = ">";

/// Wrap a type in the generic array container
pub fn array_of(element: &str) -> String {
    format!("{ARRAY_PREFIX}{element}{ARRAY_SUFFIX}")
}

/// Strip one level of array container, if present
pub fn element_type(ty: &str) -> &str {
    ty.strip_prefix(ARRAY_PREFIX)
        .and_then(|s| s.strip_suffix(ARRAY_SUFFIX))
        .unwrap_or(ty)
}

/// One generated message type (or the synthetic Date primitive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Output file the model is emitted into (empty for primitives)
    pub file_name: String,
    pub name: String,
    /// Primitives get no declarations or conversion functions
    pub primitive: bool,
    pub fields: Vec<ModelField>,
}

impl Model {
    /// The built-in Date primitive seeded into every registry
    pub fn date_primitive() -> Self {
        Self {
            file_name: String::new(),
            name: DATE_TYPE.to_string(),
            primitive: true,
            fields: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single field of a [`Model`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelField {
    /// Target-language identifier (lowerCamelCase)
    pub name: String,
    /// In-memory type, e.g. `number`, `Foo`, `Array<Date>`
    #[serde(rename = "type")]
    pub ty: String,
    /// Wire field name, kept verbatim from the schema
    pub json_name: String,
    /// Wire type, e.g. `number`, `FooJSON`, `Array<string>`
    pub json_type: String,
    pub is_message: bool,
    pub is_repeated: bool,
}

impl ModelField {
    /// In-memory type with any array container removed
    pub fn base_type(&self) -> &str {
        if self.is_repeated {
            element_type(&self.ty)
        } else {
            &self.ty
        }
    }

    /// Whether the (element) type is the Date primitive
    pub fn is_date(&self) -> bool {
        self.base_type() == DATE_TYPE
    }
}

/// One schema service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Schema package, may be empty
    pub package: String,
    pub methods: Vec<ServiceMethod>,
}

impl Service {
    /// Package-qualified service name as used in the URL path
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// One unary RPC of a [`Service`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMethod {
    /// Client method identifier (lowerCamelCase)
    pub name: String,
    /// RPC name exactly as declared, used as the last URL segment
    pub path: String,
    pub input_arg: String,
    pub input_type: String,
    pub output_type: String,
}

/// One emitted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(ty: &str, is_repeated: bool) -> ModelField {
        ModelField {
            name: "f".to_string(),
            ty: ty.to_string(),
            json_name: "f".to_string(),
            json_type: ty.to_string(),
            is_message: false,
            is_repeated,
        }
    }

    #[test]
    fn test_array_wrapping() {
        assert_eq!(array_of("Date"), "Array<Date>");
        assert_eq!(element_type("Array<Date>"), "Date");
        assert_eq!(element_type("number"), "number");
    }

    #[test]
    fn test_base_type_only_unwraps_repeated() {
        assert_eq!(field("Array<Foo>", true).base_type(), "Foo");
        assert_eq!(field("number", false).base_type(), "number");
        assert!(field("Array<Date>", true).is_date());
        assert!(field("Date", false).is_date());
        assert!(!field("Dates", false).is_date());
    }

    #[test]
    fn test_qualified_name() {
        let mut service = Service {
            name: "Haberdasher".to_string(),
            package: "twitch.twirp.example".to_string(),
            methods: vec![],
        };
        assert_eq!(service.qualified_name(), "twitch.twirp.example.Haberdasher");

        service.package.clear();
        assert_eq!(service.qualified_name(), "Haberdasher");
    }

    #[test]
    fn test_date_primitive() {
        let date = Model::date_primitive();
        assert!(date.primitive);
        assert!(date.is_empty());
        assert_eq!(date.name, DATE_TYPE);
    }
}
