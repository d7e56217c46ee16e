//! Type mapping from protobuf field kinds to Flow types
//!
//! Scalars map to the same type in memory and on the wire. Message fields
//! map to the message's simple name in memory and `<Name>JSON` on the wire,
//! except `google.protobuf.Timestamp`, which becomes a `Date` carried as an
//! RFC 3339 string. Anything without an explicit mapping is a string.

use prost_reflect::{FieldDescriptor, Kind};
use twirp_flow_common::{array_of, DATE_TYPE, JSON_SUFFIX};

use crate::naming::remove_package;

/// Fully-qualified name of the well-known Timestamp message
pub const TIMESTAMP_FULL_NAME: &str = "google.protobuf.Timestamp";

const NUMBER: &str = "number";
const STRING: &str = "string";
const BOOLEAN: &str = "boolean";

/// Result of mapping one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// In-memory type
    pub ty: String,
    /// Wire (JSON) type
    pub json_type: String,
    pub is_message: bool,
    pub is_repeated: bool,
}

/// Maps protobuf field descriptors to Flow types
pub struct TypeMapper;

impl TypeMapper {
    /// Map a field descriptor
    ///
    /// Map fields are repeated entry messages on the wire and are treated as
    /// such. Proto2 groups have no mapping and fall back to string.
    pub fn map_field(field: &FieldDescriptor) -> MappedType {
        let is_repeated = field.is_list() || field.is_map();
        if field.is_group() {
            return Self::map_kind(&Kind::String, is_repeated);
        }
        Self::map_kind(&field.kind(), is_repeated)
    }

    /// Map a field kind plus its repeated flag
    ///
    /// # Examples
    /// ```
    /// use prost_reflect::Kind;
    /// use twirp_flow_parser::TypeMapper;
    ///
    /// let mapped = TypeMapper::map_kind(&Kind::Int64, true);
    /// assert_eq!(mapped.ty, "Array<number>");
    /// assert_eq!(mapped.json_type, "Array<number>");
    /// ```
    pub fn map_kind(kind: &Kind, is_repeated: bool) -> MappedType {
        let (ty, json_type) = match kind {
            Kind::Double | Kind::Fixed32 | Kind::Fixed64 | Kind::Int32 | Kind::Int64 => {
                (NUMBER.to_string(), NUMBER.to_string())
            },
            Kind::String => (STRING.to_string(), STRING.to_string()),
            Kind::Bool => (BOOLEAN.to_string(), BOOLEAN.to_string()),
            Kind::Message(message) => Self::map_message(message.full_name()),
            // float, unsigned, signed, sfixed, bytes and enums have no mapping
            _ => (STRING.to_string(), STRING.to_string()),
        };

        let (ty, json_type) = if is_repeated {
            (array_of(&ty), array_of(&json_type))
        } else {
            (ty, json_type)
        };

        MappedType {
            ty,
            json_type,
            is_message: matches!(kind, Kind::Message(_)),
            is_repeated,
        }
    }

    /// Map a referenced message by its (optionally dot-prefixed) full name
    pub fn map_message(full_name: &str) -> (String, String) {
        if full_name.trim_start_matches('.') == TIMESTAMP_FULL_NAME {
            return (DATE_TYPE.to_string(), STRING.to_string());
        }

        let name = remove_package(full_name);
        (name.to_string(), format!("{}{}", name, JSON_SUFFIX))
    }
}
