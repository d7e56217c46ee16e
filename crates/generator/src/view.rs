//! Render-ready view of one output file
//!
//! Templates only print; every decision (nullability, conversion
//! expressions, method shape, import paths) is made while building the view.

use serde::Serialize;
use twirp_flow_common::{
    ContextRegistry, FileContext, GeneratorOptions, Model, ModelField, Service, ServiceMethod,
};

use crate::imports::{collect_imports, relative_module_path, Import};
use crate::policy::{declared_type, from_json_expr, json_type_name, to_json_expr, MethodShape};
use crate::RUNTIME_FILE;

#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub runtime_module: String,
    pub imports: Vec<Import>,
    pub models: Vec<ModelView>,
    pub services: Vec<ServiceView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelView {
    pub name: String,
    pub json_type: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    pub json_name: String,
    pub declared_type: String,
    pub json_type: String,
    pub to_json: String,
    pub from_json: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub path_prefix: String,
    pub methods: Vec<MethodView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodView {
    pub name: String,
    pub path: String,
    pub input_arg: String,
    pub input_type: String,
    pub input_json_type: String,
    pub output_type: String,
    pub takes_argument: bool,
    pub returns_value: bool,
    /// Expression sent as the request body
    pub request_body: String,
}

impl FileView {
    pub fn build(
        file: &FileContext,
        registry: &ContextRegistry,
        options: &GeneratorOptions,
    ) -> Self {
        let prefix = options.version.path_prefix();

        Self {
            runtime_module: relative_module_path(&file.file_name, RUNTIME_FILE),
            imports: collect_imports(file, registry),
            models: file
                .models
                .iter()
                .filter(|m| !m.primitive)
                .map(ModelView::build)
                .collect(),
            services: file
                .services
                .iter()
                .map(|s| ServiceView::build(s, prefix, registry))
                .collect(),
        }
    }
}

impl ModelView {
    fn build(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            json_type: json_type_name(&model.name),
            fields: model.fields.iter().map(FieldView::build).collect(),
        }
    }
}

impl FieldView {
    fn build(field: &ModelField) -> Self {
        Self {
            name: field.name.clone(),
            json_name: field.json_name.clone(),
            declared_type: declared_type(field),
            json_type: field.json_type.clone(),
            to_json: to_json_expr(field),
            from_json: from_json_expr(field),
        }
    }
}

impl ServiceView {
    fn build(service: &Service, prefix: &str, registry: &ContextRegistry) -> Self {
        Self {
            name: service.name.clone(),
            path_prefix: format!("{}/{}/", prefix, service.qualified_name()),
            methods: service
                .methods
                .iter()
                .map(|m| MethodView::build(m, registry))
                .collect(),
        }
    }
}

impl MethodView {
    fn build(method: &ServiceMethod, registry: &ContextRegistry) -> Self {
        let shape = MethodShape::resolve(method, registry);
        let request_body = if shape.takes_argument() { "body" } else { "{}" };

        Self {
            name: method.name.clone(),
            path: method.path.clone(),
            input_arg: method.input_arg.clone(),
            input_type: method.input_type.clone(),
            input_json_type: json_type_name(&method.input_type),
            output_type: method.output_type.clone(),
            takes_argument: shape.takes_argument(),
            returns_value: shape.returns_value(),
            request_body: request_body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twirp_flow_common::{RegistryBuilder, TwirpVersion};

    fn registry(package: &str) -> ContextRegistry {
        let mut builder = RegistryBuilder::new();
        builder.begin_file("api/hats.js");
        builder
            .register_model(Model {
                file_name: "api/hats.js".to_string(),
                name: "Size".to_string(),
                primitive: false,
                fields: vec![ModelField {
                    name: "inches".to_string(),
                    ty: "number".to_string(),
                    json_name: "inches".to_string(),
                    json_type: "number".to_string(),
                    is_message: false,
                    is_repeated: false,
                }],
            })
            .unwrap();
        builder
            .register_service(Service {
                name: "Haberdasher".to_string(),
                package: package.to_string(),
                methods: vec![ServiceMethod {
                    name: "makeHat".to_string(),
                    path: "MakeHat".to_string(),
                    input_arg: "size".to_string(),
                    input_type: "Size".to_string(),
                    output_type: "Size".to_string(),
                }],
            })
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_path_prefix_per_version() {
        let registry = registry("twirp.example");
        let file = &registry.files()[0];

        let v5 = FileView::build(file, &registry, &GeneratorOptions::default());
        assert_eq!(v5.services[0].path_prefix, "/twirp/twirp.example.Haberdasher/");

        let options = GeneratorOptions {
            version: TwirpVersion::V6,
        };
        let v6 = FileView::build(file, &registry, &options);
        assert_eq!(v6.services[0].path_prefix, "/twirp.example.Haberdasher/");
    }

    #[test]
    fn test_empty_package_prefix() {
        let registry = registry("");
        let view = FileView::build(&registry.files()[0], &registry, &GeneratorOptions::default());
        assert_eq!(view.services[0].path_prefix, "/twirp/Haberdasher/");
    }

    #[test]
    fn test_runtime_module_is_relative() {
        let registry = registry("pkg");
        let view = FileView::build(&registry.files()[0], &registry, &GeneratorOptions::default());
        assert_eq!(view.runtime_module, "../twirp");
    }

    #[test]
    fn test_method_view() {
        let registry = registry("pkg");
        let view = FileView::build(&registry.files()[0], &registry, &GeneratorOptions::default());
        let method = &view.services[0].methods[0];

        assert!(method.takes_argument && method.returns_value);
        assert_eq!(method.request_body, "body");
        assert_eq!(method.input_json_type, "SizeJSON");
        assert_eq!(view.models[0].json_type, "SizeJSON");
    }
}
