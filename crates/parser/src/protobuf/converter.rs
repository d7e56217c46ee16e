//! Converts protobuf descriptors into registry models and services

use prost_reflect::{FieldDescriptor, FileDescriptor, MessageDescriptor, ServiceDescriptor};
use twirp_flow_common::{Model, ModelField, RegistryBuilder, Result, Service, ServiceMethod};

use crate::naming::{camel_case, lower_first, output_file_name};
use crate::type_mapper::TypeMapper;

/// Schema file of the well-known Timestamp; mapped to the Date primitive
/// and never generated
pub const TIMESTAMP_FILE: &str = "google/protobuf/timestamp.proto";

/// Extract one schema file into the builder
pub(crate) fn extract_file(file: &FileDescriptor, builder: &mut RegistryBuilder) -> Result<()> {
    if file.name() == TIMESTAMP_FILE {
        tracing::debug!(file = %file.name(), "skipping well-known Timestamp file");
        return Ok(());
    }

    let file_name = output_file_name(file.name());
    builder.begin_file(file_name.clone());

    for message in file.messages() {
        builder.register_model(convert_message(&message, &file_name))?;
    }

    for service in file.services() {
        builder.register_service(convert_service(&service, file.package_name()))?;
    }

    Ok(())
}

fn convert_message(message: &MessageDescriptor, file_name: &str) -> Model {
    tracing::debug!(model = %message.name(), file = %file_name, "extract model");

    Model {
        file_name: file_name.to_string(),
        name: message.name().to_string(),
        primitive: false,
        fields: message.fields().map(|f| convert_field(&f)).collect(),
    }
}

fn convert_field(field: &FieldDescriptor) -> ModelField {
    let mapped = TypeMapper::map_field(field);
    let json_name = field.name().to_string();

    ModelField {
        name: camel_case(&json_name),
        ty: mapped.ty,
        json_name,
        json_type: mapped.json_type,
        is_message: mapped.is_message,
        is_repeated: mapped.is_repeated,
    }
}

fn convert_service(service: &ServiceDescriptor, package: &str) -> Service {
    let mut methods = Vec::new();

    for method in service.methods() {
        if method.is_client_streaming() || method.is_server_streaming() {
            tracing::warn!(
                service = %service.full_name(),
                method = %method.name(),
                "skipping streaming method, only unary calls are generated"
            );
            continue;
        }

        let input = method.input();
        let output = method.output();

        methods.push(ServiceMethod {
            name: lower_first(method.name()),
            path: method.name().to_string(),
            input_arg: lower_first(input.name()),
            input_type: input.name().to_string(),
            output_type: output.name().to_string(),
        });
    }

    Service {
        name: service.name().to_string(),
        package: package.to_string(),
        methods,
    }
}
