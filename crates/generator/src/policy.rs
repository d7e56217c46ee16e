//! Per-field conversion policies and method shapes
//!
//! Every expression emitted into a serializer or deserializer body comes
//! from here. Serializers read `m.<name>` from the in-memory value,
//! deserializers read `m.<json_name>` from the wire value.

use twirp_flow_common::{ContextRegistry, ModelField, ServiceMethod, JSON_SUFFIX};

/// Type annotation of a field in the in-memory declaration
///
/// Singular message fields (including `Date`) are nullable.
pub fn declared_type(field: &ModelField) -> String {
    if field.is_message && !field.is_repeated {
        format!("?{}", field.ty)
    } else {
        field.ty.clone()
    }
}

/// Expression converting an in-memory field to its wire value
pub fn to_json_expr(field: &ModelField) -> String {
    let value = format!("m.{}", field.name);
    let base = field.base_type();

    if field.is_repeated {
        if field.is_date() {
            return format!("{}.map((n) => n.toISOString())", value);
        }
        if field.is_message {
            return format!("{}.map({}ToJSON)", value, base);
        }
        return value;
    }

    if field.is_date() {
        return format!("{0} != null ? {0}.toISOString() : undefined", value);
    }

    if field.is_message {
        return format!("{0} != null ? {1}ToJSON({0}) : undefined", value, base);
    }

    value
}

/// Expression converting a wire field to its in-memory value
///
/// Absent values become `""`, `0`, `false`, `[]` or `null` depending on the
/// field. A singular `Date` is always constructed, even from an absent value.
pub fn from_json_expr(field: &ModelField) -> String {
    let value = format!("m.{}", field.json_name);
    let base = field.base_type();

    if field.is_repeated {
        if field.is_date() {
            return format!("{0} != null ? {0}.map((n) => new Date(n)) : []", value);
        }
        if field.is_message {
            return format!("{0} != null ? {0}.map(JSONTo{1}) : []", value, base);
        }
        return format!("{0} != null ? {0} : []", value);
    }

    if field.is_date() {
        return format!("new Date({})", value);
    }

    if field.is_message {
        return format!("{0} != null ? JSONTo{1}({0}) : null", value, base);
    }

    match field.ty.as_str() {
        "string" => format!("{0} != null ? {0} : \"\"", value),
        "number" => format!("{0} != null ? {0} : 0", value),
        "boolean" => format!("{0} != null ? {0} : false", value),
        _ => value,
    }
}

/// Wire type name of a model
pub fn json_type_name(model_name: &str) -> String {
    format!("{}{}", model_name, JSON_SUFFIX)
}

/// Client method signature, chosen by whether the request and response
/// models have any fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodShape {
    /// `(arg: In): Promise<Out>`
    ArgumentAndResult,
    /// `(): Promise<Out>`
    ResultOnly,
    /// `(arg: In): Promise<void>`
    ArgumentOnly,
    /// `(): Promise<void>`
    Bare,
}

impl MethodShape {
    /// Resolve a method's shape against the registry
    ///
    /// A type that does not resolve counts as non-empty.
    pub fn resolve(method: &ServiceMethod, registry: &ContextRegistry) -> Self {
        let is_empty = |name: &str| registry.lookup(name).is_some_and(|m| m.is_empty());

        match (is_empty(&method.input_type), is_empty(&method.output_type)) {
            (false, false) => MethodShape::ArgumentAndResult,
            (true, false) => MethodShape::ResultOnly,
            (false, true) => MethodShape::ArgumentOnly,
            (true, true) => MethodShape::Bare,
        }
    }

    pub fn takes_argument(self) -> bool {
        matches!(self, MethodShape::ArgumentAndResult | MethodShape::ArgumentOnly)
    }

    pub fn returns_value(self) -> bool {
        matches!(self, MethodShape::ArgumentAndResult | MethodShape::ResultOnly)
    }
}
